use crate::{
    error::{SolverError, SolverResult},
    options::DEFAULT_EPSILON,
};

/// Interval halving on a bracketed root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BisectionSolver {
    /// Halving stops once the bracket is narrower than this.
    pub epsilon: f64,
}

impl Default for BisectionSolver {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl BisectionSolver {
    /// Finds a root of `f` between `x1` and `x2`, in either order.
    ///
    /// Returns the lower bound of the final bracket, or an endpoint or
    /// midpoint where `f` is exactly zero.
    ///
    /// # Errors
    ///
    /// [`SolverError::NotBracketed`] if `f` has the same sign at both ends.
    pub fn solve<F>(&self, f: F, x1: f64, x2: f64) -> SolverResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        let (mut lower, mut upper) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };

        let mut f_lower = f(lower);
        if f_lower == 0.0 {
            return Ok(lower);
        }
        let f_upper = f(upper);
        if f_upper == 0.0 {
            return Ok(upper);
        }
        if f_lower.is_nan() || f_upper.is_nan() || f_lower.signum() == f_upper.signum() {
            return Err(SolverError::NotBracketed { lower, upper });
        }

        while upper - lower > self.epsilon {
            let mid = lower + (upper - lower) / 2.0;
            // The bracket can't shrink any further at this magnitude.
            if mid <= lower || mid >= upper {
                break;
            }

            let f_mid = f(mid);
            if f_mid == 0.0 {
                return Ok(mid);
            }
            if f_mid.signum() == f_lower.signum() {
                lower = mid;
                f_lower = f_mid;
            } else {
                upper = mid;
            }
        }

        Ok(lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_root() {
        let root = BisectionSolver::default()
            .solve(|x| x * x - 2.0, 0.0, 2.0)
            .unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-8);
        assert!(root <= 2f64.sqrt());
    }

    #[test]
    fn test_reversed_bounds() {
        let root = BisectionSolver::default()
            .solve(|x| x * x * x, 1.0, -3.0)
            .unwrap();
        assert!(root.abs() < 1e-8);
    }

    #[test]
    fn test_exact_endpoint() {
        let solver = BisectionSolver::default();
        assert_eq!(solver.solve(|x| x - 1.0, 1.0, 5.0), Ok(1.0));
        assert_eq!(solver.solve(|x| x - 5.0, 1.0, 5.0), Ok(5.0));
    }

    #[test]
    fn test_not_bracketed() {
        let result = BisectionSolver::default().solve(|x| x * x + 1.0, -1.0, 2.0);
        assert_eq!(
            result,
            Err(SolverError::NotBracketed {
                lower: -1.0,
                upper: 2.0
            })
        );
    }

    #[test]
    fn test_epsilon_below_resolution_terminates() {
        let solver = BisectionSolver { epsilon: 0.0 };
        let root = solver.solve(|x| x - 1e9 - 0.5, 0.0, 2e9).unwrap();
        assert!((root - 1e9 - 0.5).abs() < 1e-6);
    }
}
