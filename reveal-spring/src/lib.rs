//! reveal-spring models the damped spring animations of several platform
//! animation APIs and infers how long they take to settle.
//!
//! # Parameter translation
//!
//! Declarative springs, interpolating springs, duration springs and layer
//! springs all describe the same damped harmonic oscillator. Each converts
//! into a [`SpringCurve`], the canonical response, damping ratio and initial
//! velocity triple.
//!
//! ```
//! use reveal_spring::{DurationSpring, InterpolatingSpring, SpringCurve};
//!
//! let interpolating = SpringCurve::from(InterpolatingSpring {
//!     mass: 1.0,
//!     stiffness: 100.0,
//!     damping: 10.0,
//!     initial_velocity: 0.0,
//! });
//! assert!((interpolating.omega() - 10.0).abs() < 1e-12);
//!
//! // The natural frequency is solved so the motion settles in about a second.
//! let duration = SpringCurve::from(DurationSpring {
//!     duration: 1.0,
//!     damping_ratio: 0.7,
//!     initial_velocity: 0.0,
//! });
//! assert!(duration.omega() > 0.0);
//! ```
//!
//! # Settling duration
//!
//! [`SpringCurve::settling_duration`] is the last time the motion is
//! `0.001` away from rest, relative to the distance travelled. A custom
//! tolerance goes through [`SolverOptions`] and
//! [`settling::try_settling_duration`].
//!
//! # Motion and keyframes
//!
//! A [`MotionFunction`] maps a curve onto concrete start and end values and
//! splices retargeted segments together. [`sample_keyframes`] turns it into
//! the `(time, value)` sequence an animation driver consumes.
//!
//! ```
//! use reveal_spring::{
//!     DEFAULT_FRAME_INTERVAL, MotionFunction, SpringCurve, sample_keyframes,
//! };
//!
//! let motion = MotionFunction::simple(SpringCurve::new(0.5, 0.8, 0.0), 0.0, 320.0);
//! let keyframes = sample_keyframes(&motion, DEFAULT_FRAME_INTERVAL)?;
//! assert_eq!(keyframes.last().map(|frame| frame.value), Some(320.0));
//! # Ok::<(), reveal_spring::SolverError>(())
//! ```
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod curve;
pub mod error;
pub mod keyframes;
pub mod motion;
pub mod omega;
pub mod options;
pub mod params;
pub mod settling;
pub mod solver;
pub mod stride;

pub use crate::{
    curve::{DampingRegime, SpringCurve},
    error::{SolverError, SolverResult},
    keyframes::{DEFAULT_FRAME_INTERVAL, Keyframe, MAX_KEYFRAMES, sample_keyframes},
    motion::{MotionFunction, RetargetStrategy},
    options::{SolverOptions, SolverOptionsBuilder, SolverOptionsBuilderError},
    params::{DeclarativeSpring, DurationSpring, InterpolatingSpring, LayerSpring, SpringParameter},
    solver::{BisectionSolver, NewtonSolver, single_root_of_cubic, single_root_of_depressed_cubic},
    stride::Stride,
};
