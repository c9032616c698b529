//! # Settling duration
//!
//! The settling duration of a [`SpringCurve`] is the largest `t` with
//! `|y(t) - 1| = α`. After that time the motion never leaves the band of
//! half-width α around equilibrium again.
//!
//! ## Strategy
//!
//! Newton's method is always seeded where it converges monotonically toward
//! the crossing. Every crossing is also bracketed, and bisection takes over if
//! Newton fails or leaves the bracket.
//!
//! - Critical and over-damped curves have at most one turning point and one
//!   inflection point. Whether the curve overshoots, and by how much, decides
//!   which side of the turning point the last crossing is on.
//! - Under-damped curves have turning points every half period. The
//!   exponential envelope gives a time after which the band can't be left. The
//!   solver walks turning points backward from there to the latest one outside
//!   the band. The crossing follows it, and the inflection point in between
//!   seeds Newton.
use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::{
    curve::{Solution, SpringCurve},
    error::{SolverError, SolverResult},
    options::SolverOptions,
    stride::Stride,
};

/// Doublings attempted when looking for the far end of an open bracket.
const MAX_BRACKET_DOUBLINGS: usize = 64;

/// Turning point indices must stay exactly representable.
const MAX_TURNING_POINT_INDEX: f64 = 4_503_599_627_370_496.0; // 2^52

/// Settling duration with `options.tolerance` as α, falling back to `0.0`.
///
/// A failure is logged and yields an immediately settled motion, so the
/// caller always has something to animate.
pub fn settling_duration(curve: &SpringCurve, options: &SolverOptions) -> f64 {
    match try_settling_duration(curve, options) {
        Ok(duration) => duration,
        Err(error) => {
            warn!(?curve, %error, "settling duration unavailable, using 0");
            0.0
        }
    }
}

/// Settling duration with `options.tolerance` as α.
///
/// # Errors
///
/// * [`SolverError::InvalidArgument`] if the tolerance is outside `(0, 1)`.
/// * [`SolverError::NeverSettles`] for an undamped curve.
/// * Root finder errors when neither Newton nor bisection find the crossing.
pub fn try_settling_duration(curve: &SpringCurve, options: &SolverOptions) -> SolverResult<f64> {
    let alpha = options.tolerance;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(SolverError::InvalidArgument {
            name: "tolerance",
            value: alpha,
        });
    }

    let solution = curve.solution();
    match solution {
        Solution::Critical { omega, c2 } => critical(&solution, omega, c2, alpha, options),
        Solution::Overdamped { s1, s2, c1, c2 } => {
            overdamped(&solution, (s1, s2), (c1, c2), alpha, options)
        }
        Solution::Underdamped { a, b, c2 } => underdamped(&solution, a, b, c2, alpha, options),
    }
}

fn critical(
    solution: &Solution,
    omega: f64,
    c2: f64,
    alpha: f64,
    options: &SolverOptions,
) -> SolverResult<f64> {
    if c2.abs() < options.epsilon {
        // x(t) = -e^{-ωt}
        return Ok(-alpha.ln() / omega);
    }

    let turning = 1.0 / omega + 1.0 / c2;
    let inflection = turning + 1.0 / omega;
    non_oscillating(
        solution,
        alpha,
        c2 > 0.0,
        Some(turning),
        Some(inflection),
        options,
    )
}

fn overdamped(
    solution: &Solution,
    (s1, s2): (f64, f64),
    (c1, c2): (f64, f64),
    alpha: f64,
    options: &SolverOptions,
) -> SolverResult<f64> {
    if c1.abs() < options.epsilon {
        return Ok(single_mode(c2, s2, alpha));
    }
    if c2.abs() < options.epsilon {
        return Ok(single_mode(c1, s1, alpha));
    }

    // c₁sⁿ₁e^{s₁t} + c₂sⁿ₂e^{s₂t} = 0, n = 1 for turning points, 2 for inflection points
    let turning = exponential_balance(-c2 * s2 / (c1 * s1), s1 - s2);
    let inflection = exponential_balance(-c2 * s2 * s2 / (c1 * s1 * s1), s1 - s2);
    non_oscillating(solution, alpha, c1 > 0.0, turning, inflection, options)
}

/// Solution of `|c|·e^{st} = α`.
fn single_mode(c: f64, s: f64, alpha: f64) -> f64 {
    ((alpha / c.abs()).ln() / s).max(0.0)
}

/// Solution of `e^{rate·t} = ratio`, if there is one.
fn exponential_balance(ratio: f64, rate: f64) -> Option<f64> {
    (ratio > 0.0).then(|| ratio.ln() / rate)
}

/// Shared analysis for curves with at most one extremum and one inflection.
///
/// The displacement starts at `-1`. If it `overshoots`, it ends up decaying
/// from above and the turning point is its positive maximum. Otherwise it
/// stays negative for all `t > 0`.
fn non_oscillating(
    solution: &Solution,
    alpha: f64,
    overshoots: bool,
    turning: Option<f64>,
    inflection: Option<f64>,
    options: &SolverOptions,
) -> SolverResult<f64> {
    let turning = turning.filter(|t| *t > 0.0);

    if overshoots {
        let Some(peak) = turning else {
            return Err(SolverError::NoSolution);
        };

        if solution.displacement(peak) <= alpha {
            debug!(peak, "overshoot stays within the band");
            return Crossing {
                solution,
                target: -alpha,
                seed: 0.0,
                lower: 0.0,
                upper: Some(peak),
            }
            .solve(options);
        }

        debug!(peak, "overshoot leaves the band");
        return Crossing {
            solution,
            target: alpha,
            seed: inflection.map_or(peak, |t| t.max(peak)),
            lower: peak,
            upper: None,
        }
        .solve(options);
    }

    let lower = turning.unwrap_or(0.0);
    Crossing {
        solution,
        target: -alpha,
        seed: inflection.map_or(lower, |t| t.max(lower)),
        lower,
        upper: None,
    }
    .solve(options)
}

fn underdamped(
    solution: &Solution,
    a: f64,
    b: f64,
    c2: f64,
    alpha: f64,
    options: &SolverOptions,
) -> SolverResult<f64> {
    if a == 0.0 {
        return Err(SolverError::NeverSettles);
    }

    let (amplitude, phase) = Solution::amplitude_phase(c2);
    // The envelope alone keeps |x| <= α from here on.
    let envelope_bound = (alpha / amplitude).ln() / a;
    let half_period = PI / b;
    if !envelope_bound.is_finite() || envelope_bound / half_period >= MAX_TURNING_POINT_INDEX {
        return Err(SolverError::NeverSettles);
    }

    // x' = 0 where tan(bt + phase) = a / b
    let turning = Stride::new((a.atan2(b) - phase) / b, half_period);
    // x'' = 0 where tan(bt + phase) = (a² - b²) / 2ab
    let inflection = Stride::new(((a * a - b * b).atan2(2.0 * a * b) - phase) / b, half_period);

    let mut k = turning.k_before(envelope_bound);
    let lower = loop {
        let t = turning.at(k);
        if t <= 0.0 {
            break 0.0;
        }
        if solution.displacement(t).abs() > alpha {
            break t;
        }
        k -= 1;
    };
    let upper = turning.at(k + 1);
    debug!(lower, upper, envelope_bound, "last excursion outside the band");

    let candidate = inflection.at(inflection.k_before(upper));
    Crossing {
        solution,
        target: solution.displacement(lower).signum() * alpha,
        seed: if candidate > lower { candidate } else { lower },
        lower,
        upper: Some(upper),
    }
    .solve(options)
}

/// A monotone stretch of the curve that crosses `target` exactly once.
struct Crossing<'a> {
    solution: &'a Solution,
    target: f64,
    seed: f64,
    lower: f64,
    upper: Option<f64>,
}

impl Crossing<'_> {
    fn solve(self, options: &SolverOptions) -> SolverResult<f64> {
        let f = |t: f64| self.solution.displacement(t) - self.target;
        let df = |t: f64| self.solution.velocity(t);

        let slack = options.epsilon;
        let bracketed =
            |t: f64| t >= self.lower - slack && self.upper.is_none_or(|upper| t <= upper + slack);
        match options.newton().solve(&f, &df, self.seed) {
            Ok(t) if bracketed(t) => {
                return Ok(t.max(0.0));
            }
            Ok(t) => debug!(t, lower = self.lower, "newton left the bracket, bisecting"),
            Err(error) => debug!(%error, "newton failed, bisecting"),
        }

        let upper = match self.upper {
            Some(upper) => upper,
            None => self.open_upper(&f)?,
        };
        options.bisection().solve(&f, self.lower, upper)
    }

    /// Doubles the bracket width until `f` changes sign.
    fn open_upper(&self, f: impl Fn(f64) -> f64) -> SolverResult<f64> {
        let at_lower = f(self.lower).signum();
        let mut width = 1.0;
        for _ in 0..MAX_BRACKET_DOUBLINGS {
            let upper = self.lower + width;
            let value = f(upper);
            if value == 0.0 || value.signum() != at_lower {
                return Ok(upper);
            }
            width *= 2.0;
        }

        Err(SolverError::NotBracketed {
            lower: self.lower,
            upper: self.lower + width,
        })
    }
}
