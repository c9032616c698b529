//! # Spring curves
//!
//! A [`SpringCurve`] is the canonical form every source parameterization is
//! translated into: natural period (response), damping ratio and initial
//! velocity of a damped harmonic oscillator.
//!
//! ## Normalization
//!
//! Positions are normalized so the motion starts at `0.0` and rests at `1.0`.
//! Velocities use the same unit per second. A motion from `from` to `to` is
//! recovered as `from + (to - from) * position(t)`.
//!
//! ## Regimes
//!
//! The closed form depends on the damping ratio ζ:
//!
//! - under-damped (ζ < 1): `y(t) = √(1 + c₂²)·e^{at}·cos(bt + θ + π) + 1`
//!   with `a = -ωζ`, `b = ω√(1 - ζ²)`, `c₂ = (v₀ + a) / b`, `θ = atan(c₂)`.
//! - critical (ζ = 1): `y(t) = (c₁ + c₂t)·e^{-ωt} + 1` with `c₁ = -1`,
//!   `c₂ = v₀ - ω`.
//! - over-damped (ζ > 1): `y(t) = c₁e^{s₁t} + c₂e^{s₂t} + 1` with
//!   `s₁,₂ = ω(-ζ ± √(ζ² - 1))`.
//!
//! The critical form is selected within [`CRITICAL_DAMPING_BAND`] of ζ = 1.
//! The other two forms lose precision as they approach that boundary.
use std::f64::consts::PI;

use crate::{options::SolverOptions, params::LayerSpring, settling};

/// Lower bound applied to the response, which keeps `omega` finite and positive.
pub const MIN_RESPONSE: f64 = 1e-5;

/// Half-width of the band around ζ = 1 that selects the critical closed form.
pub const CRITICAL_DAMPING_BAND: f64 = 1e-9;

/// Which closed form describes a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DampingRegime {
    /// ζ < 1, the curve oscillates around equilibrium.
    Underdamped,
    /// ζ = 1, the fastest motion that does not oscillate.
    Critical,
    /// ζ > 1, a sum of two decaying exponentials.
    Overdamped,
}

/// Canonical damped oscillator parameters.
///
/// # Examples
///
/// ```
/// use reveal_spring::SpringCurve;
///
/// let curve = SpringCurve::new(0.5, 0.8, 0.0);
/// assert!(curve.position(0.0).abs() < 1e-12);
/// assert!((curve.position(10.0) - 1.0).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringCurve {
    response: f64,
    damping_ratio: f64,
    initial_velocity: f64,
}

impl SpringCurve {
    /// Creates a curve from its natural period, damping ratio and initial velocity.
    pub const fn new(response: f64, damping_ratio: f64, initial_velocity: f64) -> Self {
        Self {
            response,
            damping_ratio,
            initial_velocity,
        }
    }

    /// Creates a curve from its natural angular frequency.
    pub fn from_omega(omega: f64, damping_ratio: f64, initial_velocity: f64) -> Self {
        Self::new(2.0 * PI / omega, damping_ratio, initial_velocity)
    }

    /// The critically damped curve used by the system keyboard.
    pub fn keyboard() -> Self {
        Self::from_omega(18.0, 1.0, 0.0)
    }

    /// Natural period, floored at [`MIN_RESPONSE`].
    pub fn response(&self) -> f64 {
        self.response.max(MIN_RESPONSE)
    }

    /// Damping ratio ζ, floored at zero.
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio.max(0.0)
    }

    /// Initial velocity in normalized displacement per second.
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Natural angular frequency `2π / response`.
    pub fn omega(&self) -> f64 {
        2.0 * PI / self.response()
    }

    /// Spring stiffness for the given mass.
    pub fn stiffness(&self, mass: f64) -> f64 {
        mass * self.omega() * self.omega()
    }

    /// Damping coefficient for the given mass.
    pub fn damping(&self, mass: f64) -> f64 {
        self.damping_ratio() * 2.0 * (self.stiffness(mass) * mass).sqrt()
    }

    /// The equivalent layer spring with the given mass.
    pub fn to_layer_spring(&self, mass: f64) -> LayerSpring {
        LayerSpring {
            mass,
            stiffness: self.stiffness(mass),
            damping: self.damping(mass),
            initial_velocity: self.initial_velocity,
        }
    }

    /// The closed form that applies to this curve.
    pub fn regime(&self) -> DampingRegime {
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() <= CRITICAL_DAMPING_BAND {
            DampingRegime::Critical
        } else if zeta > 1.0 {
            DampingRegime::Overdamped
        } else {
            DampingRegime::Underdamped
        }
    }

    /// Normalized position at time `t`, `0.0` at the start and `1.0` at rest.
    pub fn position(&self, t: f64) -> f64 {
        self.solution().displacement(t) + 1.0
    }

    /// Signed distance from equilibrium at time `t`, `position(t) - 1`.
    pub fn displacement(&self, t: f64) -> f64 {
        self.solution().displacement(t)
    }

    /// Time derivative of [`position`](Self::position).
    pub fn velocity(&self, t: f64) -> f64 {
        self.solution().velocity(t)
    }

    /// Second time derivative of [`position`](Self::position).
    pub fn acceleration(&self, t: f64) -> f64 {
        self.solution().acceleration(t)
    }

    /// Time after which the curve stays within the default tolerance of rest.
    ///
    /// Returns `0.0` if the duration can't be determined, see
    /// [`settling::settling_duration`].
    pub fn settling_duration(&self) -> f64 {
        settling::settling_duration(self, &SolverOptions::default())
    }

    pub(crate) fn solution(&self) -> Solution {
        let omega = self.omega();
        let zeta = self.damping_ratio();
        let v0 = self.initial_velocity;

        match self.regime() {
            DampingRegime::Critical => Solution::Critical {
                omega,
                c2: v0 - omega,
            },
            DampingRegime::Overdamped => {
                let root = (zeta * zeta - 1.0).sqrt();
                let s1 = omega * (-zeta + root);
                let s2 = omega * (-zeta - root);
                Solution::Overdamped {
                    s1,
                    s2,
                    c1: (-s2 - v0) / (s2 - s1),
                    c2: (s1 + v0) / (s2 - s1),
                }
            }
            DampingRegime::Underdamped => {
                let a = -omega * zeta;
                let b = omega * (1.0 - zeta * zeta).sqrt();
                Solution::Underdamped {
                    a,
                    b,
                    c2: (v0 + a) / b,
                }
            }
        }
    }
}

/// Coefficients of the displacement `x(t) = y(t) - 1` in one regime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Solution {
    /// `x(t) = (c₂t - 1)·e^{-ωt}`
    Critical { omega: f64, c2: f64 },
    /// `x(t) = c₁e^{s₁t} + c₂e^{s₂t}`, with `s₂ < s₁ < 0`
    Overdamped { s1: f64, s2: f64, c1: f64, c2: f64 },
    /// `x(t) = -e^{at}·cos(bt) + c₂e^{at}·sin(bt)`
    Underdamped { a: f64, b: f64, c2: f64 },
}

impl Solution {
    /// Amplitude and phase of an under-damped curve in the form
    /// `amplitude·e^{at}·cos(bt + phase)`.
    pub(crate) fn amplitude_phase(c2: f64) -> (f64, f64) {
        ((1.0 + c2 * c2).sqrt(), c2.atan() + PI)
    }

    pub(crate) fn displacement(&self, t: f64) -> f64 {
        match *self {
            Solution::Critical { omega, c2 } => (-1.0 + c2 * t) * (-omega * t).exp(),
            Solution::Overdamped { s1, s2, c1, c2 } => c1 * (s1 * t).exp() + c2 * (s2 * t).exp(),
            Solution::Underdamped { a, b, c2 } => {
                let (amplitude, phase) = Self::amplitude_phase(c2);
                amplitude * (a * t).exp() * (b * t + phase).cos()
            }
        }
    }

    pub(crate) fn velocity(&self, t: f64) -> f64 {
        match *self {
            Solution::Critical { omega, c2 } => (c2 + omega - omega * c2 * t) * (-omega * t).exp(),
            Solution::Overdamped { s1, s2, c1, c2 } => {
                c1 * s1 * (s1 * t).exp() + c2 * s2 * (s2 * t).exp()
            }
            Solution::Underdamped { a, b, c2 } => {
                let (amplitude, phase) = Self::amplitude_phase(c2);
                let psi = b * t + phase;
                amplitude * (a * t).exp() * (a * psi.cos() - b * psi.sin())
            }
        }
    }

    pub(crate) fn acceleration(&self, t: f64) -> f64 {
        match *self {
            Solution::Critical { omega, c2 } => {
                omega * (-2.0 * c2 - omega + omega * c2 * t) * (-omega * t).exp()
            }
            Solution::Overdamped { s1, s2, c1, c2 } => {
                c1 * s1 * s1 * (s1 * t).exp() + c2 * s2 * s2 * (s2 * t).exp()
            }
            Solution::Underdamped { a, b, c2 } => {
                let (amplitude, phase) = Self::amplitude_phase(c2);
                let psi = b * t + phase;
                amplitude
                    * (a * t).exp()
                    * ((a * a - b * b) * psi.cos() - 2.0 * a * b * psi.sin())
            }
        }
    }
}
