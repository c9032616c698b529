//! Scalar root finders.
//!
//! ## Usage
//!
//! [`NewtonSolver`] is the workhorse of the settling and omega solvers. It is
//! always seeded at a point where it converges monotonically.
//! [`BisectionSolver`] serves as the fallback once a bracketing interval is
//! known. The closed-form cubic helpers locate inflection points.
mod bisection;
mod cubic;
mod newton;

pub use bisection::BisectionSolver;
pub use cubic::{single_root_of_cubic, single_root_of_depressed_cubic};
pub use newton::NewtonSolver;
