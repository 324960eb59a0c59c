//! Timecode text parsing.
//!
//! Accepted shapes, tried in this order (the first match wins, which matters
//! because a bare digit run is also a prefix of several other shapes):
//!
//! 1. `HH:MM:SS:FF` with exactly two digits per field
//! 2. `HH:MM:SS.fraction`, the fraction being part of a second (ffmpeg style)
//! 3. whitespace separated terms such as `1h 4f`, summed in any order
//! 4. a number with a unit suffix: `10h`, `20m`, `10s`, `60f`
//! 5. a bare digit run read right to left as FF, SS, MM, HH (`210` is 2s 10f)
//!
//! Drop-frame notation (`HH:MM:SS;FF`) is rejected outright.

use crate::canonical::Fields;
use crate::error::{Result, TimecodeError};
use crate::rate::FrameRate;
use crate::timecode::Timecode;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Digits kept from a bare digit run (HHMMSSFF).
const DIGIT_RUN_WIDTH: usize = 8;

/// The grammar shape an input matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `HH:MM:SS:FF`
    Complete,
    /// `HH:MM:SS.fraction`
    FractionalSeconds,
    /// Whitespace separated terms
    Composite,
    /// Number with a unit suffix
    Suffixed(Unit),
    /// Bare digits
    DigitRun,
}

/// Unit suffix of a shorthand term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// `h` or `H`
    Hours,
    /// `m` or `M`
    Minutes,
    /// `s` (lowercase only)
    Seconds,
    /// `f` or `F`
    Frames,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "h" | "H" => Some(Self::Hours),
            "m" | "M" => Some(Self::Minutes),
            "s" => Some(Self::Seconds),
            "f" | "F" => Some(Self::Frames),
            _ => None,
        }
    }

    /// Frame count of `count` units at `rate`.
    ///
    /// A partial frame is dropped: `1s` at 29.97 fps is 29 frames.
    fn to_frames(self, count: u64, rate: FrameRate) -> Result<u64> {
        let seconds_per_unit = match self {
            Self::Hours => 3600,
            Self::Minutes => 60,
            Self::Seconds => 1,
            Self::Frames => return Ok(count),
        };
        let seconds = count
            .checked_mul(seconds_per_unit)
            .ok_or(TimecodeError::Overflow)?;
        let frames = (seconds as f64 * rate.as_f64()).floor();
        if frames >= u64::MAX as f64 {
            return Err(TimecodeError::Overflow);
        }
        Ok(frames as u64)
    }
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("timecode grammar regex is valid"))
}

fn complete_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^([0-9]{2}):([0-9]{2}):([0-9]{2}):([0-9]{2})$")
}

fn fractional_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^([0-9]{2}):([0-9]{2}):([0-9]{2})\.([0-9]{1,8})$")
}

fn suffixed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^([0-9]+)([hHmMsfF])$")
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^[0-9]+$")
}

/// Parse user-entered timecode text at `rate`.
///
/// # Example
/// ```rust
/// use timecode_core::{parse, FrameRate};
///
/// assert_eq!(parse("210", FrameRate::PAL).unwrap().total(), 60);
/// assert_eq!(parse("29f 1h", FrameRate::PAL).unwrap().to_string(), "01:00:01:04");
/// assert!(parse("01:00:00;02", FrameRate::NTSC).is_err());
/// ```
pub fn parse(input: &str, rate: FrameRate) -> Result<Timecode> {
    if input.contains(';') {
        return Err(TimecodeError::drop_frame_unsupported(input));
    }

    if let Some(caps) = complete_re().captures(input) {
        trace!(input, shape = ?Shape::Complete, "matched timecode grammar");
        let fields = Fields::new(
            group(input, &caps, 1)?,
            group(input, &caps, 2)?,
            group(input, &caps, 3)?,
            group(input, &caps, 4)?,
        );
        return Timecode::from_fields(fields, rate);
    }

    if fractional_re().is_match(input) {
        return parse_with_fractional_seconds(input, rate);
    }

    if input.chars().any(char::is_whitespace) {
        trace!(input, shape = ?Shape::Composite, "matched timecode grammar");
        return parse_composite(input, rate);
    }

    if let Some(caps) = suffixed_re().captures(input) {
        let unit = Unit::from_suffix(&caps[2])
            .ok_or_else(|| TimecodeError::cannot_parse(input, "unknown unit suffix"))?;
        trace!(input, shape = ?Shape::Suffixed(unit), "matched timecode grammar");
        let count: u64 = caps[1].parse().map_err(|_| TimecodeError::Overflow)?;
        return Timecode::new(unit.to_frames(count, rate)?, rate);
    }

    if digit_run_re().is_match(input) {
        trace!(input, shape = ?Shape::DigitRun, "matched timecode grammar");
        return parse_digit_run(input, rate);
    }

    let reason = if input.is_empty() {
        "input is empty"
    } else {
        "no grammar matched"
    };
    Err(TimecodeError::cannot_parse(input, reason))
}

/// Like [`parse`], but returns the zero timecode at `rate` instead of failing.
#[must_use]
pub fn soft_parse(input: &str, rate: FrameRate) -> Timecode {
    match parse(input, rate) {
        Ok(tc) => tc,
        Err(err) => {
            debug!(input, error = %err, "unparseable timecode, using zero");
            Timecode::zero(rate)
        }
    }
}

/// Parse `HH:MM:SS.fraction`, turning the fraction of a second into a frame index.
///
/// This is how ffmpeg reports positions; `00:00:07.5` at 10 fps is `00:00:07:05`.
pub fn parse_with_fractional_seconds(input: &str, rate: FrameRate) -> Result<Timecode> {
    let caps = fractional_re()
        .captures(input)
        .ok_or_else(|| TimecodeError::cannot_parse(input, "expected HH:MM:SS.fraction"))?;
    trace!(input, shape = ?Shape::FractionalSeconds, "matched timecode grammar");

    let fraction: f64 = format!("0.{}", &caps[4])
        .parse()
        .map_err(|_| TimecodeError::cannot_parse(input, "malformed fraction"))?;
    let frame = (fraction / rate.frame_interval()).floor() as u32;

    let fields = Fields::new(
        group(input, &caps, 1)?,
        group(input, &caps, 2)?,
        group(input, &caps, 3)?,
        frame,
    );
    Timecode::from_fields(fields, rate)
}

fn parse_composite(input: &str, rate: FrameRate) -> Result<Timecode> {
    let mut terms = input.split_whitespace().peekable();
    if terms.peek().is_none() {
        return Err(TimecodeError::cannot_parse(input, "input is blank"));
    }

    let mut total: u64 = 0;
    for term in terms {
        let tc = parse(term, rate)?;
        total = total.checked_add(tc.total()).ok_or(TimecodeError::Overflow)?;
    }
    Timecode::new(total, rate)
}

fn parse_digit_run(input: &str, rate: FrameRate) -> Result<Timecode> {
    // Only the rightmost eight digits count; missing ones are leading zeros.
    let digits = &input[input.len().saturating_sub(DIGIT_RUN_WIDTH)..];
    let padded = format!("{digits:0>width$}", width = DIGIT_RUN_WIDTH);

    let pair = |at: usize| -> Result<u32> {
        padded[at..at + 2]
            .parse()
            .map_err(|_| TimecodeError::cannot_parse(input, "malformed digit run"))
    };
    let fields = Fields::new(pair(0)?, pair(2)?, pair(4)?, pair(6)?);
    Timecode::from_fields(fields, rate)
}

fn group(input: &str, caps: &Captures<'_>, index: usize) -> Result<u32> {
    caps[index]
        .parse()
        .map_err(|_| TimecodeError::cannot_parse(input, "malformed field"))
}

impl Timecode {
    /// Parse timecode text at `rate`. See [`parse`].
    pub fn parse(input: &str, rate: FrameRate) -> Result<Self> {
        parse(input, rate)
    }

    /// Parse timecode text, falling back to zero. See [`soft_parse`].
    #[must_use]
    pub fn soft_parse(input: &str, rate: FrameRate) -> Self {
        soft_parse(input, rate)
    }

    /// Parse `HH:MM:SS.fraction`. See [`parse_with_fractional_seconds`].
    pub fn parse_with_fractional_seconds(input: &str, rate: FrameRate) -> Result<Self> {
        parse_with_fractional_seconds(input, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn pal(total: u64) -> Timecode {
        Timecode::new(total, FrameRate::PAL).unwrap()
    }

    fn fps(value: f64) -> FrameRate {
        FrameRate::new(value).unwrap()
    }

    #[test]
    fn test_complete_smpte() {
        let tc = parse("00:10:34:10", FrameRate::PAL).unwrap();
        assert_eq!(tc.to_string(), "00:10:34:10");
        assert_eq!(tc.frame_rate(), FrameRate::PAL);
    }

    #[test]
    fn test_complete_smpte_out_of_range() {
        let err = parse("00:76:89:30", FrameRate::PAL).unwrap_err();
        assert_eq!(err, TimecodeError::out_of_range("minutes", 76, 59));
        assert_eq!(err.kind(), ErrorKind::Range);

        assert!(parse("00:00:00:25", FrameRate::PAL).is_err());
        assert!(parse("00:00:00:29", FrameRate::FPS30).is_ok());
    }

    #[test]
    fn test_complete_smpte_needs_two_digits() {
        let err = parse("1:2:3:4", FrameRate::PAL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CannotParse);
    }

    #[test]
    fn test_digit_run() {
        assert_eq!(parse("10", FrameRate::PAL).unwrap(), pal(10));
        assert_eq!(parse("210", FrameRate::PAL).unwrap(), pal(60));
        assert_eq!(parse("1", FrameRate::PAL).unwrap(), pal(1));
        assert_eq!(
            parse("10101010", FrameRate::PAL).unwrap().to_string(),
            "10:10:10:10"
        );
    }

    #[test]
    fn test_digit_run_truncates_left() {
        let tc = parse("991234561012", FrameRate::PAL).unwrap();
        assert_eq!(tc.to_string(), "34:56:10:12");
        assert!(parse("7700", FrameRate::PAL).unwrap_err().is_range());
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(parse("60f", FrameRate::PAL).unwrap(), pal(60));
        assert_eq!(parse("60F", FrameRate::PAL).unwrap(), pal(60));
        assert_eq!(parse("2s", FrameRate::PAL).unwrap(), pal(50));
        assert_eq!(
            parse("2s", FrameRate::FPS30).unwrap(),
            Timecode::new(60, FrameRate::FPS30).unwrap()
        );
        assert_eq!(parse("3m", FrameRate::PAL).unwrap(), pal(25 * 60 * 3));
        assert_eq!(parse("3M", FrameRate::PAL).unwrap(), pal(25 * 60 * 3));
        assert_eq!(parse("3h", FrameRate::PAL).unwrap(), pal(25 * 60 * 60 * 3));
        assert_eq!(parse("3H", FrameRate::PAL).unwrap(), pal(25 * 60 * 60 * 3));
    }

    #[test]
    fn test_seconds_suffix_is_case_sensitive() {
        let err = parse("2S", FrameRate::PAL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CannotParse);
    }

    #[test]
    fn test_suffix_truncates_fractional_rates() {
        let tc = parse("1s", FrameRate::NTSC).unwrap();
        assert_eq!(tc.total(), 29);
        assert_eq!(tc.to_string(), "00:00:00:29");
        assert_eq!(parse("3s", FrameRate::NTSC).unwrap().total(), 89);
        assert_eq!(parse("1m", FrameRate::NTSC).unwrap().total(), 1798);

        // Field construction rounds instead, so the two disagree by a frame.
        assert_eq!(Timecode::at(0, 0, 1, 0, FrameRate::NTSC).unwrap().total(), 30);

        // Whole-number rates are exact either way.
        assert_eq!(parse("1s", FrameRate::FPS30).unwrap().total(), 30);
    }

    #[test]
    fn test_suffix_limits() {
        assert!(parse("100h", FrameRate::PAL).unwrap_err().is_range());
        assert_eq!(
            parse("99999999999999999999999f", FrameRate::PAL).unwrap_err(),
            TimecodeError::Overflow
        );
    }

    #[test]
    fn test_composite_terms() {
        assert_eq!(parse("1h 4f", FrameRate::PAL).unwrap().to_string(), "01:00:00:04");
        assert_eq!(parse("4f 1h", FrameRate::PAL).unwrap().to_string(), "01:00:00:04");
        assert_eq!(parse("29f 1h", FrameRate::PAL).unwrap().to_string(), "01:00:01:04");
        assert_eq!(
            parse("1h\n\t 30m  2s", FrameRate::PAL).unwrap().to_string(),
            "01:30:02:00"
        );
        assert_eq!(
            parse(" 00:00:01:00 5f ", FrameRate::PAL).unwrap().to_string(),
            "00:00:01:05"
        );
    }

    #[test]
    fn test_composite_rejects_bad_term() {
        let err = parse("1h banana", FrameRate::PAL).unwrap_err();
        assert_eq!(err, TimecodeError::cannot_parse("banana", "no grammar matched"));
    }

    #[test]
    fn test_fractional_seconds() {
        let at10 = fps(10.0);
        assert_eq!(
            parse_with_fractional_seconds("00:00:07.1", at10).unwrap().to_string(),
            "00:00:07:01"
        );
        assert_eq!(
            parse_with_fractional_seconds("00:00:07.5", at10).unwrap().to_string(),
            "00:00:07:05"
        );

        let at12_5 = fps(12.5);
        assert_eq!(
            parse_with_fractional_seconds("00:00:07.04", at12_5).unwrap().to_string(),
            "00:00:07:00"
        );
        assert_eq!(
            parse_with_fractional_seconds("00:00:07.16", at12_5).unwrap().to_string(),
            "00:00:07:02"
        );

        // The general parser dispatches to the same path.
        assert_eq!(parse("00:00:10.96", FrameRate::PAL).unwrap().to_string(), "00:00:10:24");
        assert!(parse_with_fractional_seconds("00:00:07:01", at10).is_err());
    }

    #[test]
    fn test_improper_format() {
        for input in ["Meaningless nonsense", "", "   ", "\n", "12:34", "1x", "-5f"] {
            let err = parse(input, FrameRate::PAL).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CannotParse, "input {input:?}");
        }
    }

    #[test]
    fn test_drop_frame_rejected() {
        let err = parse("01:00:00;02", FrameRate::NTSC).unwrap_err();
        assert_eq!(err, TimecodeError::drop_frame_unsupported("01:00:00;02"));
        assert_eq!(err.kind(), ErrorKind::Unsupported);

        let err = parse("1h 00:00:00;02", FrameRate::NTSC).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_soft_parse() {
        let tc = soft_parse("Meaningless nonsense", FrameRate::PAL);
        assert!(tc.is_zero());

        let tc = soft_parse("", FrameRate::FPS30);
        assert!(tc.is_zero());
        assert_eq!(tc.frame_rate(), FrameRate::FPS30);

        assert!(soft_parse("00:76:89:30", FrameRate::PAL).is_zero());
        assert_eq!(soft_parse("2s", FrameRate::PAL), pal(50));
    }

    #[test]
    fn test_from_str_uses_default_rate() {
        let tc: Timecode = "00:00:01:00".parse().unwrap();
        assert_eq!(tc, pal(25));
        assert!("not a timecode".parse::<Timecode>().is_err());
    }
}
