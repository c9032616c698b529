//! # Motion functions
//!
//! A [`MotionFunction`] maps time since a segment started to a value and a
//! velocity in the caller's units. Animations retargeted mid-flight splice a
//! new segment onto the running one with [`MotionFunction::retarget`].
//!
//! ```
//! use reveal_spring::{MotionFunction, RetargetStrategy, SpringCurve};
//!
//! let curve = SpringCurve::new(0.5, 1.0, 0.0);
//! let first = MotionFunction::simple(curve, 0.0, 100.0);
//! let splice = first.value(0.1);
//! let second = first.retarget(0.1, curve, 50.0, RetargetStrategy::Blend);
//!
//! assert_eq!(second.target(), 50.0);
//! assert!((second.value(0.0) - splice).abs() < 1e-12);
//! ```
use tracing::debug;

use crate::curve::SpringCurve;

/// Smallest magnitude of the remaining distance used to normalize a carried velocity.
const MIN_NORMALIZING_DISTANCE: f64 = 0.001;

/// How a new segment takes over from a running motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RetargetStrategy {
    /// Restart from the current value, dropping the running motion.
    Override,
    /// Blend the running motion into the new target.
    #[default]
    Blend,
    /// Restart from the current value, carrying over the current velocity.
    KeepVelocity,
}

/// A motion segment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum MotionFunction {
    /// A single curve between two values.
    Simple {
        /// The normalized curve.
        curve: SpringCurve,
        /// Value at the start.
        from: f64,
        /// Value at rest.
        to: f64,
    },
    /// A curve toward `to` starting from the running `previous` motion.
    Composed {
        /// The motion being retargeted.
        previous: Box<MotionFunction>,
        /// Start of this segment measured on the previous segment's clock.
        start_offset: f64,
        /// Blend factor between the previous motion and `to`.
        curve: SpringCurve,
        /// Value at rest.
        to: f64,
    },
    /// A fresh curve whose initial velocity includes the previous motion's
    /// velocity at the splice point.
    KeptVelocity {
        /// The curve with the carried velocity folded in.
        curve: SpringCurve,
        /// Value of the previous motion at the splice point.
        from: f64,
        /// Value at rest.
        to: f64,
    },
}

impl MotionFunction {
    /// A motion from `from` to `to` along `curve`.
    pub fn simple(curve: SpringCurve, from: f64, to: f64) -> Self {
        Self::Simple { curve, from, to }
    }

    /// Blends `previous`, observed from `start_offset` on, toward `to`.
    pub fn composed(
        previous: MotionFunction,
        start_offset: f64,
        curve: SpringCurve,
        to: f64,
    ) -> Self {
        Self::Composed {
            previous: Box::new(previous),
            start_offset,
            curve,
            to,
        }
    }

    /// Starts `curve` from where `previous` is at `start_offset`, adding its
    /// velocity there to the curve's initial velocity.
    pub fn kept_velocity(
        previous: &MotionFunction,
        start_offset: f64,
        curve: SpringCurve,
        to: f64,
    ) -> Self {
        let from = previous.value(start_offset);
        let distance = to - from;
        let distance = if distance.abs() < MIN_NORMALIZING_DISTANCE {
            MIN_NORMALIZING_DISTANCE.copysign(distance)
        } else {
            distance
        };
        let carried = previous.velocity(start_offset) / distance;
        debug!(from, to, carried, "carrying velocity into the new segment");

        Self::KeptVelocity {
            curve: SpringCurve::new(
                curve.response(),
                curve.damping_ratio(),
                curve.initial_velocity() + carried,
            ),
            from,
            to,
        }
    }

    /// Splices a segment toward `to` onto this motion, `start_offset`
    /// seconds after this motion started.
    pub fn retarget(
        self,
        start_offset: f64,
        curve: SpringCurve,
        to: f64,
        strategy: RetargetStrategy,
    ) -> Self {
        match strategy {
            RetargetStrategy::Override => Self::simple(curve, self.value(start_offset), to),
            RetargetStrategy::Blend => Self::composed(self, start_offset, curve, to),
            RetargetStrategy::KeepVelocity => Self::kept_velocity(&self, start_offset, curve, to),
        }
    }

    /// The value the motion rests at.
    pub fn target(&self) -> f64 {
        match self {
            Self::Simple { to, .. } | Self::Composed { to, .. } | Self::KeptVelocity { to, .. } => {
                *to
            }
        }
    }

    /// Value at `t` seconds after this segment started.
    pub fn value(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        match self {
            Self::Simple { curve, from, to } | Self::KeptVelocity { curve, from, to } => {
                from + (to - from) * curve.position(t)
            }
            Self::Composed {
                previous,
                start_offset,
                curve,
                to,
            } => {
                let previous = previous.value(t + start_offset);
                previous + (to - previous) * curve.position(t)
            }
        }
    }

    /// Velocity at `t` seconds after this segment started.
    pub fn velocity(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        match self {
            Self::Simple { curve, from, to } | Self::KeptVelocity { curve, from, to } => {
                (to - from) * curve.velocity(t)
            }
            Self::Composed {
                previous,
                start_offset,
                curve,
                to,
            } => {
                let at = t + start_offset;
                previous.velocity(at) * (1.0 - curve.position(t))
                    + (to - previous.value(at)) * curve.velocity(t)
            }
        }
    }

    /// Time after which the motion stays settled.
    pub fn settling_duration(&self) -> f64 {
        match self {
            Self::Simple { curve, .. } | Self::KeptVelocity { curve, .. } => {
                curve.settling_duration()
            }
            Self::Composed {
                previous,
                start_offset,
                curve,
                ..
            } => (previous.settling_duration() - start_offset).max(curve.settling_duration()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> SpringCurve {
        SpringCurve::new(0.6, 0.7, 0.0)
    }

    fn assert_velocity_matches_value(motion: &MotionFunction) {
        let h = 1e-6;
        for i in 1..200 {
            let t = i as f64 * 0.01;
            let numeric = (motion.value(t + h) - motion.value(t - h)) / (2.0 * h);
            assert!(
                (numeric - motion.velocity(t)).abs() < 1e-4,
                "t = {t}: {numeric} vs {}",
                motion.velocity(t)
            );
        }
    }

    #[test]
    fn test_simple_endpoints() {
        let motion = MotionFunction::simple(curve(), 10.0, 20.0);
        assert!((motion.value(0.0) - 10.0).abs() < 1e-12);
        assert!(motion.velocity(0.0).abs() < 1e-9);
        let settled = motion.settling_duration();
        assert!((motion.value(settled) - 20.0).abs() <= 10.0 * 1e-3 + 1e-9);
        assert_eq!(motion.target(), 20.0);
    }

    #[test]
    fn test_before_start_rests() {
        let motion = MotionFunction::simple(SpringCurve::new(0.6, 0.7, 5.0), 10.0, 20.0);
        assert_eq!(motion.value(-1.0), motion.value(0.0));
        assert_eq!(motion.velocity(-1.0), 0.0);
        assert!(motion.velocity(0.0) > 0.0);
    }

    #[test]
    fn test_composed_is_continuous() {
        let previous = MotionFunction::simple(curve(), 0.0, 100.0);
        let splice = 0.15;
        let expected = (previous.value(splice), previous.velocity(splice));
        let motion = previous.retarget(splice, curve(), -50.0, RetargetStrategy::Blend);

        assert!((motion.value(0.0) - expected.0).abs() < 1e-9);
        assert!((motion.velocity(0.0) - expected.1).abs() < 1e-9);
        assert_velocity_matches_value(&motion);
    }

    #[test]
    fn test_composed_settling_covers_previous() {
        let slow = SpringCurve::new(3.0, 0.3, 0.0);
        let fast = SpringCurve::new(0.2, 1.0, 0.0);
        let motion = MotionFunction::simple(slow, 0.0, 1.0).retarget(
            0.5,
            fast,
            2.0,
            RetargetStrategy::Blend,
        );
        assert!((motion.settling_duration() - (slow.settling_duration() - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_kept_velocity_carries_velocity() {
        let previous = MotionFunction::simple(curve(), 0.0, 100.0);
        let splice = 0.1;
        let velocity = previous.velocity(splice);
        let motion = previous.retarget(splice, curve(), 200.0, RetargetStrategy::KeepVelocity);

        assert!((motion.velocity(0.0) - velocity).abs() < 1e-9);
        assert_velocity_matches_value(&motion);
    }

    #[test]
    fn test_kept_velocity_tiny_distance() {
        let previous = MotionFunction::simple(curve(), 0.0, 100.0);
        let from = previous.value(0.1);
        let motion = MotionFunction::kept_velocity(&previous, 0.1, curve(), from);
        let MotionFunction::KeptVelocity { curve: carried, .. } = motion else {
            panic!("expected a kept velocity segment");
        };
        let expected = previous.velocity(0.1) / MIN_NORMALIZING_DISTANCE;
        assert!((carried.initial_velocity() - expected).abs() < 1e-6 * expected.abs());
    }

    #[test]
    fn test_override_drops_previous() {
        let previous = MotionFunction::simple(curve(), 0.0, 100.0);
        let from = previous.value(0.2);
        let motion = previous.retarget(0.2, curve(), 0.0, RetargetStrategy::Override);
        assert_eq!(motion, MotionFunction::simple(curve(), from, 0.0));
        assert!(motion.velocity(0.0).abs() < 1e-9);
    }
}
