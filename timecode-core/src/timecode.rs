//! The immutable timecode value.
//!
//! A [`Timecode`] stores exactly two things: a total frame count and a frame
//! rate. Everything else (the HH:MM:SS:FF fields, string forms, the packed
//! integer) is derived. The canonical fields are computed and validated once
//! at construction, so every live value is in range and reads are free.
//!
//! Values with compatible rates (see [`FrameRate::is_compatible`]) can be
//! added, subtracted and compared. Mixing incompatible rates is an error for
//! arithmetic and division; comparisons between them are simply undefined
//! (`==` is `false` and `partial_cmp` is `None`). Nothing ever converts the
//! right-hand operand behind the caller's back.

use crate::canonical::{canonicalize, Fields};
use crate::error::{Result, TimecodeError};
use crate::rate::{FrameRate, DEFAULT_FPS};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

/// SMPTE timecode as a frame count at a frame rate.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "StoredTimecode", into = "StoredTimecode")]
pub struct Timecode {
    total: u64,
    rate: FrameRate,
    fields: Fields,
}

/// Storage shape: the two columns a timecode needs to be persisted.
#[derive(Serialize, Deserialize)]
struct StoredTimecode {
    total: u64,
    fps: f64,
}

impl Timecode {
    /// Create a timecode of `total` frames at `rate`.
    ///
    /// Fails when the frame count would need more than 99 hours.
    pub fn new(total: u64, rate: FrameRate) -> Result<Self> {
        let fields = canonicalize(total, rate)?;
        Ok(Self {
            total,
            rate,
            fields,
        })
    }

    /// The zero timecode at `rate`.
    #[must_use]
    pub fn zero(rate: FrameRate) -> Self {
        Self {
            total: 0,
            rate,
            fields: Fields::default(),
        }
    }

    /// Create a timecode at a specific HH:MM:SS:FF position.
    ///
    /// # Example
    /// ```rust
    /// use timecode_core::{FrameRate, Timecode};
    ///
    /// let tc = Timecode::at(1, 30, 45, 12, FrameRate::FILM).unwrap();
    /// assert_eq!(tc.to_string(), "01:30:45:12");
    /// assert_eq!(tc.total(), 130_692);
    /// ```
    pub fn at(hours: u32, minutes: u32, seconds: u32, frames: u32, rate: FrameRate) -> Result<Self> {
        Self::from_fields(Fields::new(hours, minutes, seconds, frames), rate)
    }

    /// Create a timecode from canonical fields.
    pub fn from_fields(fields: Fields, rate: FrameRate) -> Result<Self> {
        Self::new(fields.to_total(rate)?, rate)
    }

    /// Create a timecode from a duration in seconds.
    ///
    /// Partial frames are rounded up: 7.01 seconds at 10 fps is frame 71.
    pub fn from_seconds(seconds: f64, rate: FrameRate) -> Result<Self> {
        let frames = (seconds * rate.as_f64()).ceil();
        if frames.is_nan() || frames >= u64::MAX as f64 {
            return Err(TimecodeError::Overflow);
        }
        if frames < 0.0 {
            return Err(TimecodeError::negative_total(frames as i64));
        }
        Self::new(frames as u64, rate)
    }

    /// Total number of frames.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The frame rate.
    #[must_use]
    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    /// The frame rate in frames per second.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.rate.as_f64()
    }

    /// The canonical HH:MM:SS:FF fields.
    #[must_use]
    pub fn fields(&self) -> Fields {
        self.fields
    }

    /// Hours (0-99)
    #[must_use]
    pub fn hours(&self) -> u32 {
        self.fields.hours
    }

    /// Minutes (0-59)
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.fields.minutes
    }

    /// Seconds (0-59)
    #[must_use]
    pub fn seconds(&self) -> u32 {
        self.fields.seconds
    }

    /// Frames within the current second.
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.fields.frames
    }

    /// Check if timecode is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total == 0
    }

    /// Duration of one frame in seconds.
    #[must_use]
    pub fn frame_interval(&self) -> f64 {
        self.rate.frame_interval()
    }

    /// Wall-clock duration in seconds.
    #[must_use]
    pub fn to_seconds(&self) -> f64 {
        self.total as f64 / self.rate.as_f64()
    }

    /// The timecode one frame later.
    pub fn succ(&self) -> Result<Self> {
        self.add_frames(1)
    }

    /// Shift by a signed number of frames.
    pub fn add_frames(&self, delta: i64) -> Result<Self> {
        let total = self.total as i128 + delta as i128;
        if total < 0 {
            return Err(TimecodeError::negative_total(total as i64));
        }
        let total = u64::try_from(total).map_err(|_| TimecodeError::Overflow)?;
        Self::new(total, self.rate)
    }

    /// Add another timecode with a compatible rate.
    ///
    /// The result carries this timecode's rate.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.rate.ensure_compatible(other.rate)?;
        let total = self
            .total
            .checked_add(other.total)
            .ok_or(TimecodeError::Overflow)?;
        Self::new(total, self.rate)
    }

    /// Subtract another timecode with a compatible rate.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.rate.ensure_compatible(other.rate)?;
        match self.total.checked_sub(other.total) {
            Some(total) => Self::new(total, self.rate),
            None => Err(TimecodeError::negative_total(
                (self.total as i128 - other.total as i128) as i64,
            )),
        }
    }

    /// Multiply the frame count by a non-negative factor.
    pub fn scale(&self, factor: i64) -> Result<Self> {
        if factor < 0 {
            return Err(TimecodeError::NegativeMultiplier { factor });
        }
        let total = self
            .total
            .checked_mul(factor as u64)
            .ok_or(TimecodeError::Overflow)?;
        Self::new(total, self.rate)
    }

    /// Floor-divide the frame count, keeping the rate.
    pub fn div_frames(&self, divisor: u64) -> Result<Self> {
        if divisor == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        Self::new(self.total / divisor, self.rate)
    }

    /// How many whole times `other` fits into this timecode.
    ///
    /// Both rates must be compatible; the divisor is never converted.
    pub fn ratio(&self, other: &Self) -> Result<u64> {
        self.rate.ensure_compatible(other.rate)?;
        if other.total == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        Ok(self.total / other.total)
    }

    /// Reinterpret the same frame count at a different rate.
    ///
    /// This keeps the number of frames, not the duration: one second of PAL
    /// (25 frames) becomes 25 frames of film, i.e. `00:00:01:01` at 24 fps.
    pub fn convert(&self, rate: FrameRate) -> Result<Self> {
        Self::new(self.total, rate)
    }

    /// Compare with another timecode, failing on incompatible rates.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        self.rate.ensure_compatible(other.rate)?;
        Ok(self.total.cmp(&other.total))
    }

    /// Format with the frames field expressed as hundredths of a second.
    ///
    /// This is the form ffmpeg prints and accepts:
    /// ```rust
    /// use timecode_core::{FrameRate, Timecode};
    ///
    /// let tc = Timecode::parse("00:00:10:24", FrameRate::PAL).unwrap();
    /// assert_eq!(tc.with_fractional_seconds(), "00:00:10.96");
    /// ```
    #[must_use]
    pub fn with_fractional_seconds(&self) -> String {
        let hundredths = (100.0 / self.rate.as_f64()) * self.fields.frames as f64;
        format!(
            "{:02}:{:02}:{:02}.{:02}",
            self.fields.hours, self.fields.minutes, self.fields.seconds, hundredths as u32
        )
    }

    /// Alias for [`Timecode::with_fractional_seconds`].
    #[must_use]
    pub fn with_frames_as_fraction(&self) -> String {
        self.with_fractional_seconds()
    }

    /// Every timecode from this one up to, but excluding, `end`.
    pub fn frames_until(&self, end: &Self) -> Result<FrameSpan> {
        self.rate.ensure_compatible(end.rate)?;
        Ok(FrameSpan {
            next: self.total,
            end: end.total.max(self.total),
            rate: self.rate,
        })
    }
}

impl Default for Timecode {
    fn default() -> Self {
        Self::zero(FrameRate::default())
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.fields.hours, self.fields.minutes, self.fields.seconds, self.fields.frames
        )
    }
}

impl fmt::Debug for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timecode({}, {}F@{:.2})", self, self.total, self.rate.as_f64())
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    /// Parse at [`DEFAULT_FPS`]. Use [`Timecode::parse`] to pick the rate.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, FrameRate::new(DEFAULT_FPS)?)
    }
}

impl TryFrom<StoredTimecode> for Timecode {
    type Error = TimecodeError;

    fn try_from(stored: StoredTimecode) -> Result<Self> {
        Self::new(stored.total, FrameRate::new(stored.fps)?)
    }
}

impl From<Timecode> for StoredTimecode {
    fn from(tc: Timecode) -> Self {
        Self {
            total: tc.total,
            fps: tc.rate.as_f64(),
        }
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.rate.is_compatible(other.rate) && self.total == other.total
    }
}

impl PartialOrd for Timecode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl PartialEq<u64> for Timecode {
    fn eq(&self, other: &u64) -> bool {
        self.total == *other
    }
}

impl PartialOrd<u64> for Timecode {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        Some(self.total.cmp(other))
    }
}

impl Add for Timecode {
    type Output = Result<Self>;

    fn add(self, other: Self) -> Result<Self> {
        self.checked_add(&other)
    }
}

impl Add<i64> for Timecode {
    type Output = Result<Self>;

    fn add(self, frames: i64) -> Result<Self> {
        self.add_frames(frames)
    }
}

impl Sub for Timecode {
    type Output = Result<Self>;

    fn sub(self, other: Self) -> Result<Self> {
        self.checked_sub(&other)
    }
}

impl Sub<i64> for Timecode {
    type Output = Result<Self>;

    fn sub(self, frames: i64) -> Result<Self> {
        let delta = frames.checked_neg().ok_or(TimecodeError::Overflow)?;
        self.add_frames(delta)
    }
}

impl Mul<i64> for Timecode {
    type Output = Result<Self>;

    fn mul(self, factor: i64) -> Result<Self> {
        self.scale(factor)
    }
}

impl Div<u64> for Timecode {
    type Output = Result<Self>;

    fn div(self, divisor: u64) -> Result<Self> {
        self.div_frames(divisor)
    }
}

impl Div for Timecode {
    type Output = Result<u64>;

    fn div(self, other: Self) -> Result<u64> {
        self.ratio(&other)
    }
}

/// Iterator over consecutive frames, see [`Timecode::frames_until`].
#[derive(Debug, Clone)]
pub struct FrameSpan {
    next: u64,
    end: u64,
    rate: FrameRate,
}

impl Iterator for FrameSpan {
    type Item = Result<Timecode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let tc = Timecode::new(self.next, self.rate);
        self.next += 1;
        Some(tc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameSpan {}

impl FusedIterator for FrameSpan {}
