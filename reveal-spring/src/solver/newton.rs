use crate::{
    error::{SolverError, SolverResult},
    options::{DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS},
};

/// Newton-Raphson iteration with a floored derivative.
///
/// Whenever `|df(x)|` drops below `epsilon` the slope is replaced by
/// `±epsilon`, keeping its sign. Near flat regions this avoids division by
/// zero, but convergence is no longer guaranteed there, so callers are
/// expected to seed the iteration away from turning points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonSolver {
    /// Iteration stops once two consecutive iterates differ by less than this.
    pub epsilon: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl NewtonSolver {
    /// Finds a root of `f` starting from `x0`, with `df` being the derivative of `f`.
    ///
    /// # Errors
    ///
    /// * [`SolverError::MaxIterationsExceeded`] if the iteration does not converge
    ///   within `max_iterations` steps.
    /// * [`SolverError::NonFiniteIterate`] if an iterate becomes NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use reveal_spring::NewtonSolver;
    ///
    /// let root = NewtonSolver::default()
    ///     .solve(|x| x * x - 2.0, |x| 2.0 * x, 3.0)
    ///     .unwrap();
    /// assert!((root - 2f64.sqrt()).abs() < 1e-8);
    /// ```
    pub fn solve<F, D>(&self, f: F, df: D, x0: f64) -> SolverResult<f64>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let mut x = x0;
        for iteration in 1..=self.max_iterations {
            let slope = df(x);
            let slope = if slope.abs() < self.epsilon {
                self.epsilon.copysign(slope)
            } else {
                slope
            };

            let next = x - f(x) / slope;
            if !next.is_finite() {
                return Err(SolverError::NonFiniteIterate { iteration });
            }
            if (next - x).abs() < self.epsilon {
                return Ok(next);
            }
            x = next;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_seed() {
        let root = NewtonSolver::default()
            .solve(|x| x * x - 2.0, |x| 2.0 * x, 3.0)
            .unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-8);
    }

    #[test]
    fn test_negative_derivative() {
        let root = NewtonSolver::default()
            .solve(|x| x * x - 2.0, |x| 2.0 * x, -3.0)
            .unwrap();
        assert!((root + 2f64.sqrt()).abs() < 1e-8);
    }

    #[test]
    fn test_flat_start_keeps_moving() {
        // df(0) == 0, the floored slope pushes the iterate off the extremum.
        let root = NewtonSolver::default()
            .solve(|x| x * x - 4.0, |x| 2.0 * x, 0.0)
            .unwrap();
        assert!((root.abs() - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_iteration_budget() {
        // x^2 + 1 has no real root, Newton bounces around forever.
        let solver = NewtonSolver {
            max_iterations: 50,
            ..Default::default()
        };
        let result = solver.solve(|x| x * x + 1.0, |x| 2.0 * x, 0.5);
        assert!(matches!(
            result,
            Err(SolverError::MaxIterationsExceeded { iterations: 50 })
                | Err(SolverError::NonFiniteIterate { .. })
        ));
    }

    #[test]
    fn test_non_finite_iterate() {
        let result = NewtonSolver::default().solve(|_| f64::NAN, |_| 1.0, 0.0);
        assert_eq!(result, Err(SolverError::NonFiniteIterate { iteration: 1 }));
    }
}
