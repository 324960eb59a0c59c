//! Error types for timecode expressions.

use thiserror::Error;
use timecode_core::TimecodeError;

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors that can occur while evaluating a timecode expression.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalcError {
    /// An atom could not be built, or an operator rejected its operands.
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// The expression contains no tokens.
    #[error("Empty expression")]
    EmptyExpression,

    /// A token appeared where it is not allowed.
    #[error("Unexpected token {found:?} at position {position}")]
    UnexpectedToken {
        /// Index of the token in the token stream.
        position: usize,
        /// Text of the token.
        found: String,
    },

    /// The expression stopped where an operand was expected.
    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// Opening and closing parentheses do not pair up.
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    /// Parentheses nest deeper than the configured limit.
    #[error("Expression nests deeper than {max} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        max: usize,
    },

    /// The expression has more tokens than the configured limit.
    #[error("Expression has {count} tokens (max {max})")]
    TooManyTokens {
        /// Tokens seen before giving up.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The operator is not defined for this combination of operands.
    #[error("Cannot apply '{op}' to {left} and {right}")]
    InvalidOperands {
        /// The operator.
        op: char,
        /// Description of the left operand.
        left: String,
        /// Description of the right operand.
        right: String,
    },

    /// The expression evaluated to a plain number where a timecode was required.
    #[error("Expression evaluated to the number {0}, not a timecode")]
    NotATimecode(u64),

    /// Calculator configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    /// Create an unexpected token error.
    pub fn unexpected(position: usize, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            position,
            found: found.into(),
        }
    }

    /// Create an invalid operands error.
    pub fn invalid_operands(op: char, left: impl ToString, right: impl ToString) -> Self {
        Self::InvalidOperands {
            op,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = CalcError::unexpected(2, "+");
        assert_eq!(err.to_string(), "Unexpected token \"+\" at position 2");

        let err = CalcError::invalid_operands('-', "number 2", "timecode 00:00:00:01");
        assert_eq!(
            err.to_string(),
            "Cannot apply '-' to number 2 and timecode 00:00:00:01"
        );
    }

    #[test]
    fn test_wraps_timecode_errors() {
        let err: CalcError = TimecodeError::Overflow.into();
        assert_eq!(err.to_string(), "Timecode error: Timecode overflow");
    }
}
