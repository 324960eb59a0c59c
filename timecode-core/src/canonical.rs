//! Conversion between total frame counts and canonical HH:MM:SS:FF fields.
//!
//! Both directions validate: a frame count whose derived fields fall outside
//! their bounds, or a field tuple that could never be produced from a frame
//! count, is rejected with a range error instead of being wrapped.

use crate::error::{Result, TimecodeError};
use crate::rate::FrameRate;
use serde::{Deserialize, Serialize};

/// Maximum hours value in timecode (99).
pub const MAX_HOURS: u32 = 99;

/// Maximum minutes value in timecode (59).
pub const MAX_MINUTES: u32 = 59;

/// Maximum seconds value in timecode (59).
pub const MAX_SECONDS: u32 = 59;

/// The canonical (hours, minutes, seconds, frames) tuple of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fields {
    /// Hours (0-99)
    pub hours: u32,
    /// Minutes (0-59)
    pub minutes: u32,
    /// Seconds (0-59)
    pub seconds: u32,
    /// Frames (0 to ceil(fps)-1)
    pub frames: u32,
}

impl Fields {
    /// Bundle four field values without validating them.
    #[must_use]
    pub const fn new(hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Check the fields against their bounds at the given rate.
    pub fn validate(&self, rate: FrameRate) -> Result<()> {
        if self.hours > MAX_HOURS {
            return Err(TimecodeError::out_of_range("hours", self.hours, MAX_HOURS));
        }
        if self.minutes > MAX_MINUTES {
            return Err(TimecodeError::out_of_range(
                "minutes",
                self.minutes,
                MAX_MINUTES,
            ));
        }
        if self.seconds > MAX_SECONDS {
            return Err(TimecodeError::out_of_range(
                "seconds",
                self.seconds,
                MAX_SECONDS,
            ));
        }
        if self.frames as f64 >= rate.as_f64() {
            return Err(TimecodeError::out_of_range(
                "frames",
                self.frames,
                rate.max_frame_index(),
            ));
        }
        Ok(())
    }

    /// Total frame count these fields denote at `rate`, rounded to the nearest frame.
    ///
    /// The fields are validated first.
    pub fn to_total(&self, rate: FrameRate) -> Result<u64> {
        self.validate(rate)?;
        let fps = rate.as_f64();
        let total = self.hours as f64 * (3600.0 * fps)
            + self.minutes as f64 * (60.0 * fps)
            + self.seconds as f64 * fps
            + self.frames as f64;
        Ok(total.round() as u64)
    }
}

impl From<(u32, u32, u32, u32)> for Fields {
    fn from((hours, minutes, seconds, frames): (u32, u32, u32, u32)) -> Self {
        Self::new(hours, minutes, seconds, frames)
    }
}

/// Derive the canonical fields of `total` frames at `rate`.
///
/// Fails when the result would need more than 99 hours, and when floating
/// point rounding pushes the frames field up to the rate itself.
pub fn canonicalize(total: u64, rate: FrameRate) -> Result<Fields> {
    let fps = rate.as_f64();
    let total = total as f64;

    let seconds_total = (total / fps).floor();
    // May dip a hair below zero when total/fps rounds up to a whole second.
    let frames = (total - seconds_total * fps).max(0.0);
    let minutes_total = (seconds_total / 60.0).floor();
    let seconds = seconds_total - minutes_total * 60.0;
    let hours = (minutes_total / 60.0).floor();
    let minutes = minutes_total - hours * 60.0;

    if hours > MAX_HOURS as f64 {
        return Err(TimecodeError::out_of_range("hours", hours as u64, MAX_HOURS));
    }
    if minutes > MAX_MINUTES as f64 {
        return Err(TimecodeError::out_of_range(
            "minutes",
            minutes as u64,
            MAX_MINUTES,
        ));
    }
    if seconds > MAX_SECONDS as f64 {
        return Err(TimecodeError::out_of_range(
            "seconds",
            seconds as u64,
            MAX_SECONDS,
        ));
    }
    if frames >= fps {
        return Err(TimecodeError::out_of_range(
            "frames",
            frames,
            rate.max_frame_index(),
        ));
    }

    Ok(Fields {
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
        frames: frames.floor() as u32,
    })
}
