//! Failure modes shared by the numeric solvers.
//!
//! ## Usage
//!
//! Solver entry points return [`SolverResult`]. Callers that must always
//! produce some motion apply their own fallback, see
//! [`settling_duration`](crate::settling::settling_duration) and
//! [`omega`](crate::omega::omega).
use thiserror::Error;

/// Convenience alias for solver results.
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors raised by the root finders and the solvers built on top of them.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolverError {
    /// Newton iteration did not converge within its iteration budget.
    #[error("newton iteration did not converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations performed.
        iterations: usize,
    },
    /// Newton iteration produced NaN or an infinity.
    #[error("newton iteration produced a non-finite value at iteration {iteration}")]
    NonFiniteIterate {
        /// Iteration at which the value stopped being finite.
        iteration: usize,
    },
    /// The function has the same sign at both ends of the interval.
    #[error("root is not bracketed by [{lower}, {upper}]")]
    NotBracketed {
        /// Lower end of the interval.
        lower: f64,
        /// Upper end of the interval.
        upper: f64,
    },
    /// The cubic has three distinct real roots, which is not handled.
    #[error("cubic equation has three distinct real roots")]
    ThreeRealRootsUnsupported,
    /// The cubic's leading coefficient is zero.
    #[error("leading coefficient of the cubic equation is zero")]
    ZeroLeadingCoefficient,
    /// An undamped oscillator never enters the settling band for good.
    #[error("undamped spring never settles")]
    NeverSettles,
    /// The equation has no root in the admissible domain.
    #[error("equation has no admissible solution")]
    NoSolution,
    /// Sampling a motion would produce more keyframes than allowed.
    #[error("sampling would produce {frames} keyframes, more than the limit of {limit}")]
    TooManyKeyframes {
        /// Keyframes the motion would need.
        frames: f64,
        /// The configured limit.
        limit: usize,
    },
    /// An input is outside of its valid range.
    #[error("invalid value {value} for `{name}`")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
