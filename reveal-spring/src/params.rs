//! Spring parameters as the various animation APIs express them.
//!
//! ## Usage
//!
//! Each record converts into a [`SpringCurve`] through `From`. Records that
//! can't express over-damping clamp the damping ratio to `1.0`.
//!
//! ```
//! use reveal_spring::{DampingRegime, InterpolatingSpring, LayerSpring, SpringCurve};
//!
//! let heavy = InterpolatingSpring {
//!     damping: 40.0,
//!     ..Default::default()
//! };
//! assert_eq!(SpringCurve::from(heavy).regime(), DampingRegime::Overdamped);
//!
//! let layer = LayerSpring {
//!     damping: 40.0,
//!     ..Default::default()
//! };
//! assert_eq!(SpringCurve::from(layer).regime(), DampingRegime::Critical);
//! ```
use crate::{curve::SpringCurve, omega, options::SolverOptions};

/// Lower bound applied to mass and stiffness before converting them.
pub const MIN_COEFFICIENT: f64 = 1e-5;

/// Shortest duration accepted by [`DurationSpring`].
pub const MIN_DURATION: f64 = 0.01;
/// Longest duration accepted by [`DurationSpring`].
pub const MAX_DURATION: f64 = 10.0;

/// A declarative spring given by response and damping fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclarativeSpring {
    /// Natural period in seconds.
    pub response: f64,
    /// Damping ratio, over-damping allowed.
    pub damping_fraction: f64,
    /// Blend time with a running animation, unused by the curve itself.
    pub blend_duration: f64,
}

impl Default for DeclarativeSpring {
    fn default() -> Self {
        Self {
            response: 0.55,
            damping_fraction: 0.825,
            blend_duration: 0.0,
        }
    }
}

impl DeclarativeSpring {
    /// The short, stiff spring used for interactive gestures.
    pub fn interactive() -> Self {
        Self {
            response: 0.15,
            damping_fraction: 0.86,
            blend_duration: 0.25,
        }
    }
}

impl From<DeclarativeSpring> for SpringCurve {
    fn from(spring: DeclarativeSpring) -> Self {
        SpringCurve::new(spring.response, spring.damping_fraction, 0.0)
    }
}

/// A spring given by classical mass, stiffness and damping coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolatingSpring {
    /// Mass attached to the spring.
    pub mass: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Initial velocity in normalized displacement per second.
    pub initial_velocity: f64,
}

impl Default for InterpolatingSpring {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            initial_velocity: 0.0,
        }
    }
}

impl From<InterpolatingSpring> for SpringCurve {
    fn from(spring: InterpolatingSpring) -> Self {
        let (omega, damping_ratio) = omega_zeta(spring.mass, spring.stiffness, spring.damping);
        SpringCurve::from_omega(omega, damping_ratio, spring.initial_velocity)
    }
}

/// A view animation spring given by duration and damping ratio.
///
/// `duration` is not the settling time itself: the natural frequency is
/// inverse-solved so that the motion settles to within `0.001` after
/// `duration`, see [`omega::omega`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationSpring {
    /// Requested duration in seconds.
    pub duration: f64,
    /// Damping ratio, clamped to `[0, 1]`.
    pub damping_ratio: f64,
    /// Initial velocity in normalized displacement per second.
    pub initial_velocity: f64,
}

impl Default for DurationSpring {
    fn default() -> Self {
        Self {
            duration: 0.5,
            damping_ratio: 1.0,
            initial_velocity: 0.0,
        }
    }
}

impl DurationSpring {
    /// Duration clamped to the range native implementations accept.
    pub fn clamped_duration(&self) -> f64 {
        self.duration.clamp(MIN_DURATION, MAX_DURATION)
    }

    /// Converts to a curve using custom solver options.
    ///
    /// A damping ratio within `options.epsilon` of `1.0` becomes exactly
    /// `1.0`, matching the critical frequency equation it was solved with.
    pub fn curve_with(&self, options: &SolverOptions) -> SpringCurve {
        let damping_ratio = self.damping_ratio.clamp(0.0, 1.0);
        let damping_ratio = if damping_ratio >= 1.0 - options.epsilon {
            1.0
        } else {
            damping_ratio
        };
        SpringCurve::from_omega(
            omega::omega(self, options),
            damping_ratio,
            self.initial_velocity,
        )
    }

    /// The layer spring a platform would run for this duration spring, with unit mass.
    pub fn to_layer_spring(&self) -> LayerSpring {
        SpringCurve::from(*self).to_layer_spring(1.0)
    }
}

impl From<DurationSpring> for SpringCurve {
    fn from(spring: DurationSpring) -> Self {
        spring.curve_with(&SolverOptions::default())
    }
}

/// A compositing layer spring. Same coefficients as [`InterpolatingSpring`],
/// but the damping ratio is capped at `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerSpring {
    /// Mass attached to the spring.
    pub mass: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Initial velocity in normalized displacement per second.
    pub initial_velocity: f64,
}

impl Default for LayerSpring {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            initial_velocity: 0.0,
        }
    }
}

impl LayerSpring {
    /// Natural angular frequency.
    pub fn omega(&self) -> f64 {
        omega_zeta(self.mass, self.stiffness, self.damping).0
    }

    /// Damping ratio before clamping.
    pub fn damping_ratio(&self) -> f64 {
        omega_zeta(self.mass, self.stiffness, self.damping).1
    }
}

impl From<LayerSpring> for SpringCurve {
    fn from(spring: LayerSpring) -> Self {
        let (omega, damping_ratio) = omega_zeta(spring.mass, spring.stiffness, spring.damping);
        SpringCurve::from_omega(omega, damping_ratio.min(1.0), spring.initial_velocity)
    }
}

/// Any of the supported source parameterizations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum SpringParameter {
    /// See [`DeclarativeSpring`].
    Declarative(DeclarativeSpring),
    /// See [`InterpolatingSpring`].
    Interpolating(InterpolatingSpring),
    /// See [`DurationSpring`].
    Duration(DurationSpring),
    /// See [`LayerSpring`].
    Layer(LayerSpring),
}

impl Default for SpringParameter {
    fn default() -> Self {
        Self::Declarative(DeclarativeSpring::default())
    }
}

impl SpringParameter {
    /// The canonical curve for this parameter set.
    pub fn curve(&self) -> SpringCurve {
        SpringCurve::from(*self)
    }
}

impl From<SpringParameter> for SpringCurve {
    fn from(parameter: SpringParameter) -> Self {
        match parameter {
            SpringParameter::Declarative(spring) => spring.into(),
            SpringParameter::Interpolating(spring) => spring.into(),
            SpringParameter::Duration(spring) => spring.into(),
            SpringParameter::Layer(spring) => spring.into(),
        }
    }
}

impl From<DeclarativeSpring> for SpringParameter {
    fn from(spring: DeclarativeSpring) -> Self {
        Self::Declarative(spring)
    }
}

impl From<InterpolatingSpring> for SpringParameter {
    fn from(spring: InterpolatingSpring) -> Self {
        Self::Interpolating(spring)
    }
}

impl From<DurationSpring> for SpringParameter {
    fn from(spring: DurationSpring) -> Self {
        Self::Duration(spring)
    }
}

impl From<LayerSpring> for SpringParameter {
    fn from(spring: LayerSpring) -> Self {
        Self::Layer(spring)
    }
}

/// `(ω, ζ)` of a spring-mass-damper: `ω = √(k/m)`, `ζ = c / 2√(km)`.
fn omega_zeta(mass: f64, stiffness: f64, damping: f64) -> (f64, f64) {
    let mass = mass.max(MIN_COEFFICIENT);
    let stiffness = stiffness.max(MIN_COEFFICIENT);
    (
        (stiffness / mass).sqrt(),
        damping / 2.0 / (stiffness * mass).sqrt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::DampingRegime;

    #[test]
    fn test_declarative_conversion() {
        let curve = SpringCurve::from(DeclarativeSpring::default());
        assert_eq!(curve.response(), 0.55);
        assert_eq!(curve.damping_ratio(), 0.825);
        assert_eq!(curve.initial_velocity(), 0.0);

        let over = SpringCurve::from(DeclarativeSpring {
            damping_fraction: 1.8,
            ..Default::default()
        });
        assert_eq!(over.damping_ratio(), 1.8);
    }

    #[test]
    fn test_interpolating_conversion() {
        let spring = InterpolatingSpring {
            mass: 2.0,
            stiffness: 50.0,
            damping: 8.0,
            initial_velocity: -1.5,
        };
        let curve = SpringCurve::from(spring);
        assert!((curve.omega() - 5.0).abs() < 1e-12);
        assert!((curve.damping_ratio() - 0.4).abs() < 1e-12);
        assert_eq!(curve.initial_velocity(), -1.5);
    }

    #[test]
    fn test_layer_spring_caps_damping_ratio() {
        let spring = LayerSpring {
            mass: 1.0,
            stiffness: 100.0,
            damping: 60.0,
            initial_velocity: 0.0,
        };
        assert!((spring.damping_ratio() - 3.0).abs() < 1e-12);
        assert_eq!(SpringCurve::from(spring).damping_ratio(), 1.0);

        let interpolating = InterpolatingSpring {
            mass: 1.0,
            stiffness: 100.0,
            damping: 60.0,
            initial_velocity: 0.0,
        };
        assert_eq!(
            SpringCurve::from(interpolating).regime(),
            DampingRegime::Overdamped
        );
    }

    #[test]
    fn test_zero_mass_stays_finite() {
        let curve = SpringCurve::from(LayerSpring {
            mass: 0.0,
            stiffness: 0.0,
            ..Default::default()
        });
        assert!(curve.omega().is_finite() && curve.omega() > 0.0);
    }

    #[test]
    fn test_duration_spring_clamps() {
        let spring = DurationSpring {
            duration: 100.0,
            damping_ratio: 1.7,
            initial_velocity: 0.0,
        };
        assert_eq!(spring.clamped_duration(), MAX_DURATION);
        assert_eq!(SpringCurve::from(spring).damping_ratio(), 1.0);
    }

    #[test]
    fn test_nearly_critical_duration_spring_is_critical() {
        let spring = DurationSpring {
            duration: 0.5,
            damping_ratio: 1.0 - 5e-9,
            initial_velocity: 0.0,
        };
        let curve = SpringCurve::from(spring);
        assert_eq!(curve.damping_ratio(), 1.0);
        assert_eq!(curve.regime(), DampingRegime::Critical);
        assert!((curve.settling_duration() - 0.5).abs() < 1e-6);

        let underdamped = SpringCurve::from(DurationSpring {
            damping_ratio: 0.99,
            ..spring
        });
        assert_eq!(underdamped.damping_ratio(), 0.99);
    }

    #[test]
    fn test_parameter_dispatch() {
        let declarative = DeclarativeSpring::interactive();
        assert_eq!(
            SpringParameter::from(declarative).curve(),
            SpringCurve::from(declarative)
        );

        let layer = LayerSpring::default();
        assert_eq!(SpringParameter::from(layer).curve(), SpringCurve::from(layer));
    }
}
