//! Error types for timecode operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Broad category of a [`TimecodeError`].
///
/// Callers that only care about *why* an operation failed (a value out of
/// bounds, mixed frame rates, unreadable input, or an unsupported notation)
/// can match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A field or a computed total is outside its valid bounds.
    Range,
    /// Two operands carry incompatible frame rates.
    WrongFramerate,
    /// Input text matches none of the recognized grammars.
    CannotParse,
    /// The input uses a notation that is deliberately not supported.
    Unsupported,
}

/// Errors that can occur during timecode operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// A canonical field exceeds its maximum.
    #[error("Timecode component out of range: {component} = {value} (max {max})")]
    ComponentOutOfRange {
        /// Name of the component (hours, minutes, seconds, frames).
        component: String,
        /// The offending value.
        value: String,
        /// The largest value allowed for this component.
        max: String,
    },

    /// Arithmetic produced a negative frame count.
    #[error("Timecode cannot be negative: {value} frames")]
    NegativeTotal {
        /// The negative total that was computed.
        value: i64,
    },

    /// Frame rate is zero, negative or not a finite number.
    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate {
        /// String representation of the rejected rate.
        fps: String,
    },

    /// Multiplication by a negative factor.
    #[error("Timecode multiplier cannot be negative: {factor}")]
    NegativeMultiplier {
        /// The rejected factor.
        factor: i64,
    },

    /// Division by zero or by a zero-length timecode.
    #[error("Division by zero")]
    DivisionByZero,

    /// Frame count does not fit into 64 bits.
    #[error("Timecode overflow")]
    Overflow,

    /// Packed integer contains a nibble that is not a decimal digit.
    #[error("Packed timecode nibble {position} is not BCD: {nibble:#x}")]
    NotBcd {
        /// Nibble index, 0 being the least significant.
        position: u8,
        /// The offending nibble value.
        nibble: u8,
    },

    /// Operands carry frame rates outside the comparison tolerance.
    #[error("Frame rate mismatch: {left} vs {right}")]
    FrameRateMismatch {
        /// String representation of the left operand's frame rate.
        left: String,
        /// String representation of the right operand's frame rate.
        right: String,
    },

    /// Text matched none of the accepted timecode grammars.
    #[error("Cannot parse {input:?} into timecode: {reason}")]
    CannotParse {
        /// The rejected input.
        input: String,
        /// Why no grammar matched.
        reason: String,
    },

    /// Drop-frame notation (`HH:MM:SS;FF`) was encountered.
    #[error("Drop-frame timecode is not supported: {input:?}")]
    DropFrameUnsupported {
        /// The rejected input.
        input: String,
    },
}

impl TimecodeError {
    /// Create a component out of range error.
    pub fn out_of_range(
        component: impl Into<String>,
        value: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::ComponentOutOfRange {
            component: component.into(),
            value: value.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a negative total error.
    pub fn negative_total(value: i64) -> Self {
        Self::NegativeTotal { value }
    }

    /// Create an invalid frame rate error.
    pub fn invalid_frame_rate(fps: f64) -> Self {
        Self::InvalidFrameRate {
            fps: fps.to_string(),
        }
    }

    /// Create a frame rate mismatch error.
    pub fn frame_rate_mismatch(left: impl ToString, right: impl ToString) -> Self {
        Self::FrameRateMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Create a parse error.
    pub fn cannot_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CannotParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a drop-frame rejection error.
    pub fn drop_frame_unsupported(input: impl Into<String>) -> Self {
        Self::DropFrameUnsupported {
            input: input.into(),
        }
    }

    /// The broad category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ComponentOutOfRange { .. }
            | Self::NegativeTotal { .. }
            | Self::InvalidFrameRate { .. }
            | Self::NegativeMultiplier { .. }
            | Self::DivisionByZero
            | Self::Overflow
            | Self::NotBcd { .. } => ErrorKind::Range,
            Self::FrameRateMismatch { .. } => ErrorKind::WrongFramerate,
            Self::CannotParse { .. } => ErrorKind::CannotParse,
            Self::DropFrameUnsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// Whether this is a range error.
    #[must_use]
    pub fn is_range(&self) -> bool {
        self.kind() == ErrorKind::Range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = TimecodeError::cannot_parse("abc", "no match");
        assert_eq!(
            err.to_string(),
            "Cannot parse \"abc\" into timecode: no match"
        );

        let err = TimecodeError::out_of_range("hours", 100, 99);
        assert_eq!(
            err.to_string(),
            "Timecode component out of range: hours = 100 (max 99)"
        );

        let err = TimecodeError::frame_rate_mismatch(25.0, 30.0);
        assert_eq!(err.to_string(), "Frame rate mismatch: 25 vs 30");

        let err = TimecodeError::NotBcd {
            position: 3,
            nibble: 0xc,
        };
        assert_eq!(err.to_string(), "Packed timecode nibble 3 is not BCD: 0xc");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(TimecodeError::Overflow.kind(), ErrorKind::Range);
        assert_eq!(TimecodeError::negative_total(-1).kind(), ErrorKind::Range);
        assert_eq!(TimecodeError::invalid_frame_rate(0.0).kind(), ErrorKind::Range);
        assert_eq!(
            TimecodeError::frame_rate_mismatch(25, 30).kind(),
            ErrorKind::WrongFramerate
        );
        assert_eq!(
            TimecodeError::cannot_parse("", "empty").kind(),
            ErrorKind::CannotParse
        );
        assert_eq!(
            TimecodeError::drop_frame_unsupported("00:00:00;00").kind(),
            ErrorKind::Unsupported
        );
        assert!(TimecodeError::DivisionByZero.is_range());
    }

    #[test]
    fn test_error_serialization() {
        let err = TimecodeError::cannot_parse("test", "error");
        let json = serde_json::to_string(&err).unwrap();
        let decoded: TimecodeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, decoded);
    }
}
