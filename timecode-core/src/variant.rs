//! Timecode newtypes that keep their own type through arithmetic.
//!
//! Applications often wrap [`Timecode`] to tell different timelines apart
//! (source vs. record, tape vs. file). Implementing [`TimecodeVariant`] for
//! such a wrapper gives it the full construction and arithmetic surface,
//! with every result coming back as the wrapper rather than a bare
//! `Timecode`.
//!
//! ```rust
//! use timecode_core::{FrameRate, Timecode, TimecodeVariant};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct RecordIn(Timecode);
//!
//! impl TimecodeVariant for RecordIn {
//!     fn as_timecode(&self) -> &Timecode {
//!         &self.0
//!     }
//!
//!     fn from_timecode(tc: Timecode) -> Self {
//!         Self(tc)
//!     }
//! }
//!
//! let start = RecordIn::parse("10:00:00:00", FrameRate::PAL).unwrap();
//! let next: RecordIn = start.succ().unwrap();
//! assert_eq!(next.as_timecode().to_string(), "10:00:00:01");
//! ```

use crate::error::Result;
use crate::rate::FrameRate;
use crate::timecode::Timecode;

/// A type that is a [`Timecode`] underneath and wants factories to return itself.
pub trait TimecodeVariant: Sized {
    /// The wrapped timecode.
    fn as_timecode(&self) -> &Timecode;

    /// Wrap a timecode.
    fn from_timecode(tc: Timecode) -> Self;

    /// Build from a total frame count.
    fn from_frames(total: u64, rate: FrameRate) -> Result<Self> {
        Timecode::new(total, rate).map(Self::from_timecode)
    }

    /// Build from HH:MM:SS:FF fields.
    fn at(hours: u32, minutes: u32, seconds: u32, frames: u32, rate: FrameRate) -> Result<Self> {
        Timecode::at(hours, minutes, seconds, frames, rate).map(Self::from_timecode)
    }

    /// Build from timecode text.
    fn parse(input: &str, rate: FrameRate) -> Result<Self> {
        Timecode::parse(input, rate).map(Self::from_timecode)
    }

    /// The value one frame later.
    fn succ(&self) -> Result<Self> {
        self.as_timecode().succ().map(Self::from_timecode)
    }

    /// Shift by a signed number of frames.
    fn offset(&self, delta: i64) -> Result<Self> {
        self.as_timecode().add_frames(delta).map(Self::from_timecode)
    }

    /// Multiply the frame count.
    fn scale(&self, factor: i64) -> Result<Self> {
        self.as_timecode().scale(factor).map(Self::from_timecode)
    }

    /// Same frame count at another rate.
    fn convert(&self, rate: FrameRate) -> Result<Self> {
        self.as_timecode().convert(rate).map(Self::from_timecode)
    }

    /// Add any other timecode variant with a compatible rate.
    fn plus<T: TimecodeVariant>(&self, other: &T) -> Result<Self> {
        self.as_timecode()
            .checked_add(other.as_timecode())
            .map(Self::from_timecode)
    }

    /// Subtract any other timecode variant with a compatible rate.
    fn minus<T: TimecodeVariant>(&self, other: &T) -> Result<Self> {
        self.as_timecode()
            .checked_sub(other.as_timecode())
            .map(Self::from_timecode)
    }
}

impl TimecodeVariant for Timecode {
    fn as_timecode(&self) -> &Timecode {
        self
    }

    fn from_timecode(tc: Timecode) -> Self {
        tc
    }
}
