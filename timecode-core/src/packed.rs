//! Bit-packed BCD timecodes.
//!
//! DPX headers and SGI tooling store timecode as an unsigned 32-bit integer
//! holding eight binary-coded-decimal nibbles:
//!
//! ```text
//!  31    28 27    24 23    20 19    16 15    12 11     8 7      4 3      0
//! +--------+--------+--------+--------+--------+--------+--------+--------+
//! | H tens | H units| M tens | M units| S tens | S units| F tens | F units|
//! +--------+--------+--------+--------+--------+--------+--------+--------+
//! ```

use crate::canonical::Fields;
use crate::error::{Result, TimecodeError};
use crate::rate::FrameRate;
use crate::timecode::Timecode;

/// Number of BCD nibbles in a packed timecode.
pub const PACKED_NIBBLES: u8 = 8;

/// Largest value a two-digit BCD field can carry.
const MAX_FIELD: u32 = 99;

/// Pack the canonical fields of `tc` into a 32-bit BCD integer.
///
/// Fails if a field needs more than two decimal digits, which only happens
/// for the frames field at rates above 100 fps.
pub fn to_packed(tc: &Timecode) -> Result<u32> {
    let Fields {
        hours,
        minutes,
        seconds,
        frames,
    } = tc.fields();

    let mut packed = 0u32;
    for (name, value) in [
        ("hours", hours),
        ("minutes", minutes),
        ("seconds", seconds),
        ("frames", frames),
    ] {
        if value > MAX_FIELD {
            return Err(TimecodeError::out_of_range(name, value, MAX_FIELD));
        }
        packed = (packed << 8) | ((value / 10) << 4) | (value % 10);
    }
    Ok(packed)
}

/// Unpack a 32-bit BCD integer into a timecode at `rate`.
///
/// Every nibble must be a decimal digit, and the decoded fields go through
/// the same validation as [`Timecode::at`].
pub fn from_packed(packed: u32, rate: FrameRate) -> Result<Timecode> {
    let mut digits = [0u32; PACKED_NIBBLES as usize];
    for position in 0..PACKED_NIBBLES {
        let nibble = (packed >> (u32::from(position) * 4)) & 0x0F;
        if nibble > 9 {
            return Err(TimecodeError::NotBcd {
                position,
                nibble: nibble as u8,
            });
        }
        digits[usize::from(PACKED_NIBBLES - 1 - position)] = nibble;
    }

    let field = |index: usize| digits[index] * 10 + digits[index + 1];
    Timecode::from_fields(Fields::new(field(0), field(2), field(4), field(6)), rate)
}

impl Timecode {
    /// Pack into a 32-bit BCD integer. See [`to_packed`].
    pub fn to_packed(&self) -> Result<u32> {
        to_packed(self)
    }

    /// Unpack a 32-bit BCD integer. See [`from_packed`].
    pub fn from_packed(packed: u32, rate: FrameRate) -> Result<Self> {
        from_packed(packed, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pack_known_value() {
        let tc = Timecode::at(5, 34, 42, 5, FrameRate::PAL).unwrap();
        assert_eq!(tc.to_packed().unwrap(), 87310853);
        assert_eq!(tc.to_packed().unwrap(), 0x0534_4205);
    }

    #[test]
    fn test_unpack_known_value() {
        let tc = Timecode::from_packed(87310853, FrameRate::PAL).unwrap();
        assert_eq!(tc.fields(), Fields::new(5, 34, 42, 5));
        assert_eq!(tc, Timecode::at(5, 34, 42, 5, FrameRate::PAL).unwrap());
    }

    #[test]
    fn test_pack_extremes() {
        assert_eq!(Timecode::zero(FrameRate::PAL).to_packed().unwrap(), 0);
        let last = Timecode::at(99, 59, 59, 29, FrameRate::FPS30).unwrap();
        assert_eq!(last.to_packed().unwrap(), 0x9959_5929);
    }

    #[test]
    fn test_pack_rejects_three_digit_frames() {
        let rate = FrameRate::new(120.0).unwrap();
        let tc = Timecode::at(0, 0, 0, 119, rate).unwrap();
        assert_eq!(
            tc.to_packed().unwrap_err(),
            TimecodeError::out_of_range("frames", 119, 99)
        );
    }

    #[test]
    fn test_unpack_rejects_non_bcd() {
        let err = Timecode::from_packed(0x0000_000A, FrameRate::PAL).unwrap_err();
        assert_eq!(
            err,
            TimecodeError::NotBcd {
                position: 0,
                nibble: 0xA
            }
        );

        let err = Timecode::from_packed(0xF000_0000, FrameRate::PAL).unwrap_err();
        assert_eq!(
            err,
            TimecodeError::NotBcd {
                position: 7,
                nibble: 0xF
            }
        );
    }

    #[test]
    fn test_unpack_validates_fields() {
        // 25 frames does not exist at 25 fps.
        assert!(Timecode::from_packed(0x0000_0025, FrameRate::PAL)
            .unwrap_err()
            .is_range());
        assert!(Timecode::from_packed(0x0000_0025, FrameRate::FPS30).is_ok());
        assert!(Timecode::from_packed(0x0060_0000, FrameRate::PAL).is_err());
    }
}
