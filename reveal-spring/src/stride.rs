//! Evenly spaced points, indexed by an integer.
//!
//! ## Usage
//!
//! The turning points and inflection points of an under-damped spring repeat
//! every half period. A [`Stride`] names them by index so that the settling
//! solver can walk them backward from a known bound.

/// The points `x + k * step` for every integer `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stride {
    /// The point at `k == 0`.
    pub x: f64,
    /// Distance between neighbouring points, must be positive.
    pub step: f64,
}

impl Stride {
    /// Creates a stride through `x` with the given positive `step`.
    pub const fn new(x: f64, step: f64) -> Self {
        Self { x, step }
    }

    /// The `k`-th point.
    pub fn at(&self, k: i64) -> f64 {
        self.x + k as f64 * self.step
    }

    /// The largest `k` such that `self.at(k) <= y`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reveal_spring::Stride;
    ///
    /// assert_eq!(Stride::new(10.0, 1.0).k_before(15.5), 5);
    /// assert_eq!(Stride::new(5.0, 0.1).k_before(4.35), -7);
    /// ```
    pub fn k_before(&self, y: f64) -> i64 {
        debug_assert!(self.step > 0.0, "stride step must be positive");

        let mut k = ((y - self.x) / self.step).floor() as i64;
        // The division may land one step off either way after rounding.
        if self.at(k) > y {
            k -= 1;
        } else if self.at(k + 1) <= y {
            k += 1;
        }
        k
    }
}
