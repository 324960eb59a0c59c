//! SMPTE timecode values.
//!
//! A [`Timecode`] is an immutable pair of a total frame count and a frame
//! rate. Hours, minutes, seconds and frames are derived from those two
//! numbers, so arithmetic never accumulates rounding error and no value can
//! hold an out-of-range field.
//!
//! - **Parsing**: `HH:MM:SS:FF`, `HH:MM:SS.fraction`, shorthand such as
//!   `1h 30m 4f`, and bare digit runs such as `210`
//! - **Arithmetic**: addition, subtraction, scaling and division, guarded by
//!   frame rate compatibility
//! - **Packing**: the 32-bit BCD form used by DPX and SGI files
//!
//! # Quick Start
//!
//! ```rust
//! use timecode_core::{FrameRate, Timecode};
//!
//! // Create a timecode
//! let tc = Timecode::at(1, 30, 45, 12, FrameRate::FILM).unwrap();
//! println!("Timecode: {}", tc); // Output: 01:30:45:12
//!
//! // Parse from string
//! let tc2 = Timecode::parse("1h 4f", FrameRate::PAL).unwrap();
//! assert_eq!(tc2.to_string(), "01:00:00:04");
//!
//! // Timecode arithmetic
//! let tc3 = (tc2 + 100).unwrap();
//! assert_eq!(tc3.to_string(), "01:00:04:04");
//! ```
//!
//! # Frame rates
//!
//! Rates are floating point so that 30000/1001 can be used directly. Two
//! rates within [`ALLOWED_FPS_DELTA`] of each other are treated as equal;
//! anything further apart cannot be mixed:
//!
//! ```rust
//! use timecode_core::{FrameRate, Timecode};
//!
//! let pal = Timecode::new(10, FrameRate::PAL).unwrap();
//! let ntsc = Timecode::new(10, FrameRate::NTSC).unwrap();
//! assert!((pal + ntsc).is_err());
//! ```
//!
//! Drop-frame timecode is not supported; text using the `;` separator is
//! rejected rather than approximated.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod canonical;
pub mod error;
pub mod packed;
pub mod parser;
pub mod rate;
pub mod timecode;
pub mod variant;

// Re-export main types
pub use canonical::{canonicalize, Fields, MAX_HOURS, MAX_MINUTES, MAX_SECONDS};
pub use error::{ErrorKind, Result, TimecodeError};
pub use packed::{from_packed, to_packed};
pub use parser::{parse, parse_with_fractional_seconds, soft_parse};
pub use rate::{FrameRate, ALLOWED_FPS_DELTA, DEFAULT_FPS};
pub use timecode::{FrameSpan, Timecode};
pub use variant::TimecodeVariant;

/// Create a timecode from hours, minutes, seconds, and frames.
///
/// # Example
/// ```rust
/// use timecode_core::{timecode, FrameRate};
///
/// let tc = timecode(1, 30, 45, 12, FrameRate::FILM).unwrap();
/// assert_eq!(tc.to_string(), "01:30:45:12");
/// ```
pub fn timecode(
    hours: u32,
    minutes: u32,
    seconds: u32,
    frames: u32,
    frame_rate: FrameRate,
) -> Result<Timecode> {
    Timecode::at(hours, minutes, seconds, frames, frame_rate)
}

/// Signed distance in frames from `start` to `end`.
///
/// Fails if the two timecodes do not share a compatible frame rate.
pub fn duration_frames(start: &Timecode, end: &Timecode) -> Result<i64> {
    start.frame_rate().ensure_compatible(end.frame_rate())?;
    Ok(end.total() as i64 - start.total() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timecode_convenience() {
        let tc = timecode(1, 30, 45, 12, FrameRate::FILM).unwrap();
        assert_eq!(tc.to_string(), "01:30:45:12");
    }

    #[test]
    fn test_duration_frames() {
        let start = timecode(0, 0, 0, 0, FrameRate::FILM).unwrap();
        let end = timecode(0, 0, 1, 0, FrameRate::FILM).unwrap();
        assert_eq!(duration_frames(&start, &end).unwrap(), 24);
        assert_eq!(duration_frames(&end, &start).unwrap(), -24);

        let other = timecode(0, 0, 1, 0, FrameRate::PAL).unwrap();
        assert!(duration_frames(&start, &other).is_err());
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_HOURS, 99);
        assert_eq!(MAX_MINUTES, 59);
        assert_eq!(MAX_SECONDS, 59);
        assert_eq!(DEFAULT_FPS, 25.0);
        assert_eq!(ALLOWED_FPS_DELTA, 0.001);
    }

    #[test]
    fn test_parse_and_format_roundtrip() {
        let original = "12:34:56:07";
        let tc = parse(original, FrameRate::FILM).unwrap();
        assert_eq!(tc.to_string(), original);
    }

    #[test]
    fn test_frame_rate_conversions() {
        let frame_rates = [
            FrameRate::FILM,
            FrameRate::FILM_NTSC,
            FrameRate::PAL,
            FrameRate::NTSC,
            FrameRate::FPS30,
            FrameRate::FPS48,
            FrameRate::FPS50,
            FrameRate::NTSC_HFR,
            FrameRate::FPS60,
        ];

        for fps in frame_rates {
            let tc = timecode(0, 1, 0, 0, fps).unwrap();
            let seconds = tc.to_seconds();
            assert!(
                (seconds - 60.0).abs() < 0.1,
                "Frame rate {} gave {} seconds",
                fps,
                seconds
            );
        }
    }

    #[test]
    fn test_frame_number_roundtrip() {
        for frame in [0, 1, 24, 100, 1000, 86400, 100000] {
            let tc = Timecode::new(frame, FrameRate::FILM).unwrap();
            let back = timecode(tc.hours(), tc.minutes(), tc.seconds(), tc.frames(), FrameRate::FILM)
                .unwrap();
            assert_eq!(frame, back.total(), "Frame {} roundtrip failed", frame);
        }
    }
}
