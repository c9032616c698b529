//! Numeric knobs shared by every solver.
//!
//! ## Usage
//!
//! Start from [`SolverOptions::default`], which carries the constants that
//! native spring implementations agree on, or adjust single fields with
//! [`SolverOptionsBuilder`].
use derive_builder::Builder;

use crate::solver::{BisectionSolver, NewtonSolver};

/// Default convergence threshold of the root finders.
pub const DEFAULT_EPSILON: f64 = 1e-8;
/// Default iteration cap of the Newton solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Default half-width of the settled band around equilibrium.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Convergence and tolerance settings.
///
/// # Examples
///
/// ```
/// use reveal_spring::{SolverOptions, SolverOptionsBuilder};
///
/// let options = SolverOptionsBuilder::default()
///     .tolerance(1e-4)
///     .build()
///     .unwrap();
/// assert_eq!(options.epsilon, SolverOptions::default().epsilon);
/// assert_eq!(options.tolerance, 1e-4);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverOptions {
    /// Convergence threshold, also used as the "close to zero" cutoff.
    pub epsilon: f64,
    /// Iteration cap for Newton's method.
    pub max_iterations: usize,
    /// Settled band half-width α, as a fraction of the total displacement.
    pub tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverOptions {
    /// Newton solver configured with these options.
    pub fn newton(&self) -> NewtonSolver {
        NewtonSolver {
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
        }
    }

    /// Bisection solver configured with these options.
    pub fn bisection(&self) -> BisectionSolver {
        BisectionSolver {
            epsilon: self.epsilon,
        }
    }
}
