//! Sampling a motion into keyframes for an external animation driver.
use tracing::debug;

use crate::{
    error::{SolverError, SolverResult},
    motion::MotionFunction,
};

/// Refresh interval of a 60 Hz display, in seconds.
pub const DEFAULT_FRAME_INTERVAL: f64 = 1.0 / 60.0;

/// Most keyframes a single motion is sampled into, about half an hour at 60 Hz.
pub const MAX_KEYFRAMES: usize = 100_000;

/// A sampled value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Seconds since the segment started.
    pub time: f64,
    /// Motion value at `time`.
    pub value: f64,
}

/// Samples `motion` every `frame_interval` seconds until it settles.
///
/// The first keyframe is at `0.0`. The last one is at the settling duration
/// and holds the target value exactly.
///
/// # Errors
///
/// * [`SolverError::InvalidArgument`] if `frame_interval` is not a positive
///   finite number.
/// * [`SolverError::TooManyKeyframes`] if the motion settles too slowly to be
///   sampled into at most [`MAX_KEYFRAMES`] keyframes.
pub fn sample_keyframes(
    motion: &MotionFunction,
    frame_interval: f64,
) -> SolverResult<Vec<Keyframe>> {
    if !(frame_interval.is_finite() && frame_interval > 0.0) {
        return Err(SolverError::InvalidArgument {
            name: "frame_interval",
            value: frame_interval,
        });
    }

    let duration = motion.settling_duration();
    // Frames closer than this to the end are replaced by the final keyframe.
    let merge = frame_interval * 1e-3;
    let frames = (duration / frame_interval).ceil();
    if frames >= MAX_KEYFRAMES as f64 {
        return Err(SolverError::TooManyKeyframes {
            frames,
            limit: MAX_KEYFRAMES,
        });
    }
    let frames = frames as usize;

    let mut keyframes: Vec<Keyframe> = (0..frames)
        .map(|i| i as f64 * frame_interval)
        .take_while(|time| *time < duration - merge)
        .map(|time| Keyframe {
            time,
            value: motion.value(time),
        })
        .collect();
    keyframes.push(Keyframe {
        time: duration,
        value: motion.target(),
    });

    debug!(duration, count = keyframes.len(), "sampled keyframes");
    Ok(keyframes)
}
