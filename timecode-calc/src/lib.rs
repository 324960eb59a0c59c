//! Timecode expression calculator.
//!
//! Evaluates arithmetic over timecodes written in any notation the
//! [`timecode_core`] parser accepts:
//!
//! ```rust
//! use timecode_calc::{calculate, Value};
//! use timecode_core::FrameRate;
//!
//! let value = calculate("10:00:00:00 - 1h 30m + 12f", FrameRate::PAL).unwrap();
//! assert_eq!(value.to_string(), "08:30:00:12");
//!
//! // Dividing two timecodes gives a plain count
//! let count = calculate("1h / 10m", FrameRate::PAL).unwrap();
//! assert_eq!(count, Value::Number(6));
//! ```
//!
//! All atoms in one expression share the calculator's frame rate.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod eval;
pub mod lexer;

pub use config::CalcConfig;
pub use error::{CalcError, Result};
pub use eval::{calculate, Calculator, Value};
pub use lexer::{tokenize, Token};
