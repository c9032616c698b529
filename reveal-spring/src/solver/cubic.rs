use crate::error::{SolverError, SolverResult};

/// The single real root of `x³ + px + q = 0`.
///
/// # Errors
///
/// [`SolverError::ThreeRealRootsUnsupported`] when the discriminant shows three
/// distinct real roots.
pub fn single_root_of_depressed_cubic(p: f64, q: f64) -> SolverResult<f64> {
    let delta = -(q * q / 4.0 + p * p * p / 27.0);
    if delta > 0.0 {
        return Err(SolverError::ThreeRealRootsUnsupported);
    }

    let sqrt_neg_delta = (-delta).sqrt();
    // `cbrt` keeps the sign, so negative radicands stay on the real line.
    Ok((-q / 2.0 + sqrt_neg_delta).cbrt() + (-q / 2.0 - sqrt_neg_delta).cbrt())
}

/// The single real root of `ax³ + bx² + cx + d = 0`.
///
/// The equation is depressed with `x = y - b / 3a` and handed to
/// [`single_root_of_depressed_cubic`].
///
/// # Errors
///
/// * [`SolverError::ZeroLeadingCoefficient`] if `a == 0`.
/// * [`SolverError::ThreeRealRootsUnsupported`] as for the depressed form.
///
/// # Examples
///
/// ```
/// use reveal_spring::single_root_of_cubic;
///
/// let x = single_root_of_cubic(1.0, 0.0, 0.0, 8.0).unwrap();
/// assert!((x + 2.0).abs() < 1e-12);
/// ```
pub fn single_root_of_cubic(a: f64, b: f64, c: f64, d: f64) -> SolverResult<f64> {
    if a == 0.0 {
        return Err(SolverError::ZeroLeadingCoefficient);
    }

    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (27.0 * a * a * d - 9.0 * a * b * c + 2.0 * b * b * b) / (27.0 * a * a * a);

    Ok(single_root_of_depressed_cubic(p, q)? - b / 3.0 / a)
}
