//! Frame rates.
//!
//! Rates are stored as floating point frames per second so that fractional
//! broadcast rates such as 30000/1001 can be represented directly. Because
//! those rates never survive a round trip through decimal text exactly, two
//! rates are considered the same when they differ by at most
//! [`ALLOWED_FPS_DELTA`].

use crate::error::{Result, TimecodeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate used when the caller does not name one (PAL).
pub const DEFAULT_FPS: f64 = 25.0;

/// Largest absolute difference between two rates that still compare equal.
pub const ALLOWED_FPS_DELTA: f64 = 0.001;

/// A positive, finite number of frames per second.
///
/// Equality is tolerance based: `FrameRate::NTSC == FrameRate::new(29.97003)?`.
/// The relation is therefore not transitive and `FrameRate` deliberately does
/// not implement `Eq` or `Hash`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// 24 fps (film)
    pub const FILM: Self = Self(24.0);
    /// 23.976 fps (24000/1001, NTSC film)
    pub const FILM_NTSC: Self = Self(24000.0 / 1001.0);
    /// 25 fps (PAL)
    pub const PAL: Self = Self(25.0);
    /// 29.97 fps (30000/1001, NTSC)
    pub const NTSC: Self = Self(30000.0 / 1001.0);
    /// 30 fps
    pub const FPS30: Self = Self(30.0);
    /// 48 fps (HFR film)
    pub const FPS48: Self = Self(48.0);
    /// 50 fps (PAL progressive)
    pub const FPS50: Self = Self(50.0);
    /// 59.94 fps (60000/1001)
    pub const NTSC_HFR: Self = Self(60000.0 / 1001.0);
    /// 60 fps
    pub const FPS60: Self = Self(60.0);

    /// Create a frame rate, rejecting zero, negative and non-finite values.
    pub fn new(fps: f64) -> Result<Self> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(TimecodeError::invalid_frame_rate(fps))
        }
    }

    /// Create a frame rate from a rational such as 30000/1001.
    pub fn from_rational(numerator: u32, denominator: u32) -> Result<Self> {
        if denominator == 0 {
            return Err(TimecodeError::invalid_frame_rate(f64::NAN));
        }
        Self::new(numerator as f64 / denominator as f64)
    }

    /// Frames per second.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Duration of one frame in seconds.
    #[must_use]
    pub fn frame_interval(self) -> f64 {
        1.0 / self.0
    }

    /// Largest frame index a single second can hold, `ceil(fps) - 1`.
    #[must_use]
    pub fn max_frame_index(self) -> u32 {
        (self.0.ceil() as u32).saturating_sub(1)
    }

    /// Whether two rates are within [`ALLOWED_FPS_DELTA`] of each other.
    #[must_use]
    pub fn is_compatible(self, other: Self) -> bool {
        (self.0 - other.0).abs() <= ALLOWED_FPS_DELTA
    }

    /// Fail with a frame rate mismatch unless the rates are compatible.
    pub fn ensure_compatible(self, other: Self) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(TimecodeError::frame_rate_mismatch(self, other))
        }
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FPS)
    }
}

impl PartialEq for FrameRate {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(*other)
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = TimecodeError;

    fn try_from(fps: f64) -> Result<Self> {
        Self::new(fps)
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = TimecodeError;

    fn try_from(fps: u32) -> Result<Self> {
        Self::new(fps as f64)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
