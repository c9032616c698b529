//! # Natural frequency from a duration
//!
//! A [`DurationSpring`] names the time it should take to settle, not its
//! frequency. This module inverts the settling estimate: it finds ω such that
//! the slowest decaying term of the motion reaches the tolerance band exactly
//! at the requested duration.
//!
//! Under-damped springs reduce to `|u/ω - 1|·e^{-Eω} = c` with `u = v₀/ζ`,
//! `E = Dζ` and `c = α√(1 - ζ²)/ζ`. Critically damped springs reduce to
//! `|w - a|·e^{-w} = α` in `w = Dω` with `a = v₀D - 1`. Both equations can
//! have two roots. The largest one is returned since it is the one whose
//! motion is still outside the band right before the duration elapses.
use tracing::{debug, warn};

use crate::{
    error::{SolverError, SolverResult},
    options::SolverOptions,
    params::DurationSpring,
    solver::single_root_of_cubic,
};

/// Halvings attempted when looking for a seed, enough to reach subnormals.
const MAX_SEED_HALVINGS: usize = 1100;

/// Natural frequency for `spring`, falling back to `1.0`.
///
/// ```
/// use reveal_spring::{DurationSpring, SolverOptions, SpringCurve, omega};
///
/// let spring = DurationSpring {
///     duration: 1.0,
///     damping_ratio: 0.5,
///     initial_velocity: 0.0,
/// };
/// let omega = omega::omega(&spring, &SolverOptions::default());
/// let curve = SpringCurve::from_omega(omega, 0.5, 0.0);
/// assert!(curve.settling_duration() <= 1.0 + 1e-6);
/// ```
pub fn omega(spring: &DurationSpring, options: &SolverOptions) -> f64 {
    match try_omega(spring, options) {
        Ok(omega) => omega,
        Err(error) => {
            warn!(?spring, %error, "natural frequency unavailable, using 1");
            1.0
        }
    }
}

/// Natural frequency for `spring`.
///
/// # Errors
///
/// * [`SolverError::InvalidArgument`] if the tolerance is outside `(0, 1)`.
/// * [`SolverError::NoSolution`] if no positive frequency settles in time.
/// * Root finder errors from the underlying Newton iterations.
pub fn try_omega(spring: &DurationSpring, options: &SolverOptions) -> SolverResult<f64> {
    let alpha = options.tolerance;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(SolverError::InvalidArgument {
            name: "tolerance",
            value: alpha,
        });
    }

    let duration = spring.clamped_duration();
    let zeta = spring.damping_ratio;
    let v0 = spring.initial_velocity;
    let epsilon = options.epsilon;

    let omega = if zeta < epsilon {
        debug!(zeta, "undamped duration spring");
        return Ok(1.0);
    } else if zeta >= 1.0 - epsilon {
        critical(duration, v0, alpha, options)?
    } else {
        underdamped(duration, zeta, v0, alpha, options)?
    };

    if omega.is_finite() && omega > 0.0 {
        Ok(omega)
    } else {
        Err(SolverError::NoSolution)
    }
}

fn underdamped(
    duration: f64,
    zeta: f64,
    v0: f64,
    alpha: f64,
    options: &SolverOptions,
) -> SolverResult<f64> {
    let epsilon = options.epsilon;
    let u = v0 / zeta;
    let e = duration * zeta;
    let c = alpha * (1.0 - zeta * zeta).sqrt() / zeta;

    let g = |w: f64| (u / w - 1.0) * (-e * w).exp();
    let dg = |w: f64| (-u / (w * w) - e * u / w + e) * (-e * w).exp();

    if u.abs() < epsilon {
        return Ok(-c.ln() / e);
    }

    let newton = options.newton();
    if u < 0.0 {
        // g rises monotonically from -∞ toward 0
        let seed = halve_until(1.0, |w| g(w) + c < 0.0)?;
        debug!(u, seed, "moving away from rest");
        return newton.solve(|w| g(w) + c, dg, seed);
    }

    // g falls from +∞ through 0 at ω = u to its minimum, then rises toward 0
    let minimum = (u + (u * u + 4.0 * u / e).sqrt()) / 2.0;
    let gap = g(minimum) + c;
    if gap.abs() < epsilon {
        debug!(u, minimum, "minimum touches the band");
        return Ok(minimum);
    }

    if gap < 0.0 {
        // Past the inflection point g is concave and rising.
        let x = single_root_of_cubic(2.0 * u, 2.0 * e * u, e * e * u, -e * e)?;
        let inflection = 1.0 / x;
        debug!(u, minimum, inflection, "overshoot leaves the band");
        return newton.solve(|w| g(w) + c, dg, inflection.max(minimum));
    }

    // Only the descent before ω = u reaches c.
    let seed = halve_until(u, |w| g(w) - c > 0.0)?;
    debug!(u, seed, "overshoot stays within the band");
    newton.solve(|w| g(w) - c, dg, seed)
}

fn critical(duration: f64, v0: f64, alpha: f64, options: &SolverOptions) -> SolverResult<f64> {
    let a = v0 * duration - 1.0;
    let h = |w: f64| (w - a) * (-w).exp() - alpha;
    let dh = |w: f64| (1.0 + a - w) * (-w).exp();

    let newton = options.newton();
    let w = if h((a + 1.0).max(0.0)) > 0.0 {
        debug!(a, "critical tail leaves the band");
        newton.solve(h, dh, (a + 2.0).max(0.0))?
    } else if a > alpha {
        debug!(a, "critical start is the last excursion");
        newton.solve(
            |w| (a - w) * (-w).exp() - alpha,
            |w| (w - a - 1.0) * (-w).exp(),
            0.0,
        )?
    } else {
        return Err(SolverError::NoSolution);
    };

    Ok(w / duration)
}

/// Halves `start` until `accept` holds.
fn halve_until(start: f64, accept: impl Fn(f64) -> bool) -> SolverResult<f64> {
    let mut x = start;
    for _ in 0..MAX_SEED_HALVINGS {
        if accept(x) {
            return Ok(x);
        }
        x /= 2.0;
    }
    Err(SolverError::NoSolution)
}
