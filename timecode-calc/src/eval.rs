//! Expression evaluation.
//!
//! Precedence climbing over the token stream: `*` and `/` bind tighter than
//! `+` and `-`, and operators of equal precedence associate to the left.
//! Every atom is parsed as a timecode at the configured rate, except a bare
//! digit run (parenthesized or not) on the right of `*` or `/`, or on the
//! left of `*` when the right side is a timecode, which is a plain scalar.

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::lexer::{tokenize, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use timecode_core::{FrameRate, Timecode, TimecodeError};
use tracing::{debug, trace};

/// The result of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A timecode at the calculator's rate.
    Timecode(Timecode),
    /// A plain count, e.g. the result of dividing two timecodes.
    Number(u64),
}

impl Value {
    /// The timecode, if this is one.
    pub fn as_timecode(&self) -> Option<&Timecode> {
        match self {
            Value::Timecode(tc) => Some(tc),
            Value::Number(_) => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Value::Timecode(_) => None,
            Value::Number(n) => Some(*n),
        }
    }

    /// Unwrap into a timecode, failing for plain numbers.
    pub fn into_timecode(self) -> Result<Timecode> {
        match self {
            Value::Timecode(tc) => Ok(tc),
            Value::Number(n) => Err(CalcError::NotATimecode(n)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Timecode(tc) => format!("timecode {tc}"),
            Value::Number(n) => format!("number {n}"),
        }
    }
}

impl From<Timecode> for Value {
    fn from(tc: Timecode) -> Self {
        Value::Timecode(tc)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Timecode(tc) => write!(f, "{tc}"),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Evaluates timecode expressions such as `10:00:00:00 - 1h 30m + 12f`.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalcConfig,
}

impl Calculator {
    /// Create a calculator, validating the configuration.
    pub fn new(config: CalcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Evaluate an expression.
    pub fn evaluate(&self, input: &str) -> Result<Value> {
        let tokens = tokenize(input, self.config.max_tokens)?;
        if tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        debug!(
            input,
            tokens = tokens.len(),
            fps = %self.config.frame_rate,
            "evaluating timecode expression"
        );

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            config: &self.config,
        };
        let operand = parser.expression()?;
        parser.finish()?;
        parser.resolve(operand)
    }

    /// Evaluate an expression that must produce a timecode.
    pub fn evaluate_timecode(&self, input: &str) -> Result<Timecode> {
        self.evaluate(input)?.into_timecode()
    }
}

/// Evaluate `input` with every atom read at `rate`.
pub fn calculate(input: &str, rate: FrameRate) -> Result<Value> {
    Calculator::new(CalcConfig::default().with_frame_rate(rate))?.evaluate(input)
}

/// An operand before it is known how it will be used.
///
/// A bare digit run is a frame count under `+` and `-` but a scalar under
/// `*` and `/`, so it stays unresolved until its operator is known.
#[derive(Debug, Clone, Copy)]
enum Operand<'a> {
    Digits(&'a str),
    Value(Value),
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
    config: &'a CalcConfig,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Operand<'a>> {
        let mut left = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let right = self.term()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Operand<'a>> {
        let mut left = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let right = self.factor()?;
            left = self.combine(op, left, right)?;
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<Operand<'a>> {
        match self.next() {
            Some(Token::Atom(text)) if text.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(Operand::Digits(text))
            }
            Some(Token::Atom(text)) => Ok(Operand::Value(Value::Timecode(Timecode::parse(
                text,
                self.config.frame_rate,
            )?))),
            Some(Token::LParen) => {
                self.depth += 1;
                if self.depth > self.config.max_depth {
                    return Err(CalcError::NestingTooDeep {
                        max: self.config.max_depth,
                    });
                }
                let operand = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => {}
                    Some(other) => return Err(CalcError::unexpected(self.pos - 1, other.to_string())),
                    None => return Err(CalcError::UnbalancedParentheses),
                }
                self.depth -= 1;
                Ok(operand)
            }
            Some(other) => Err(CalcError::unexpected(self.pos - 1, other.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    /// Resolve both operands for `op` and apply it.
    ///
    /// Under `*` and `/` the right digit run is a scalar, and under `*` the
    /// left one is too when the right side is a timecode. Everywhere else a
    /// digit run is read as timecode text.
    fn combine(&self, op: Token<'a>, left: Operand<'a>, right: Operand<'a>) -> Result<Operand<'a>> {
        let multiplicative = matches!(op, Token::Star | Token::Slash);
        let right = match right {
            Operand::Digits(text) if multiplicative => Value::Number(scalar(text)?),
            other => self.resolve(other)?,
        };
        let left = match left {
            Operand::Digits(text) if op == Token::Star && matches!(right, Value::Timecode(_)) => {
                Value::Number(scalar(text)?)
            }
            other => self.resolve(other)?,
        };
        apply(op, left, right).map(Operand::Value)
    }

    fn resolve(&self, operand: Operand<'_>) -> Result<Value> {
        match operand {
            Operand::Digits(text) => Ok(Value::Timecode(Timecode::parse(
                text,
                self.config.frame_rate,
            )?)),
            Operand::Value(value) => Ok(value),
        }
    }

    fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(Token::RParen) => Err(CalcError::UnbalancedParentheses),
            Some(other) => Err(CalcError::unexpected(self.pos, other.to_string())),
        }
    }
}

fn scalar(text: &str) -> Result<u64> {
    text.parse().map_err(|_| TimecodeError::Overflow.into())
}

fn apply(op: Token<'_>, left: Value, right: Value) -> Result<Value> {
    use Value::{Number, Timecode as Tc};

    trace!(op = %op, left = %left, right = %right, "applying operator");
    let value = match (op, left, right) {
        (Token::Plus, Tc(a), Tc(b)) => Tc((a + b)?),
        (Token::Plus, Tc(a), Number(n)) | (Token::Plus, Number(n), Tc(a)) => {
            Tc((a + frames(n)?)?)
        }
        (Token::Plus, Number(a), Number(b)) => {
            Number(a.checked_add(b).ok_or(TimecodeError::Overflow)?)
        }

        (Token::Minus, Tc(a), Tc(b)) => Tc((a - b)?),
        (Token::Minus, Tc(a), Number(n)) => Tc((a - frames(n)?)?),
        (Token::Minus, Number(a), Number(b)) => match a.checked_sub(b) {
            Some(n) => Number(n),
            None => return Err(TimecodeError::negative_total(frames(a)? - frames(b)?).into()),
        },

        (Token::Star, Tc(a), Number(n)) | (Token::Star, Number(n), Tc(a)) => {
            Tc((a * frames(n)?)?)
        }
        (Token::Star, Number(a), Number(b)) => {
            Number(a.checked_mul(b).ok_or(TimecodeError::Overflow)?)
        }

        (Token::Slash, Tc(a), Number(n)) => Tc((a / n)?),
        (Token::Slash, Tc(a), Tc(b)) => Number((a / b)?),
        (Token::Slash, Number(a), Number(b)) => {
            Number(a.checked_div(b).ok_or(TimecodeError::DivisionByZero)?)
        }

        (op, left, right) => {
            return Err(CalcError::invalid_operands(
                symbol(op),
                left.describe(),
                right.describe(),
            ))
        }
    };
    Ok(value)
}

fn frames(n: u64) -> Result<i64> {
    i64::try_from(n).map_err(|_| TimecodeError::Overflow.into())
}

fn symbol(op: Token<'_>) -> char {
    match op {
        Token::Plus => '+',
        Token::Minus => '-',
        Token::Star => '*',
        Token::Slash => '/',
        Token::LParen => '(',
        Token::RParen => ')',
        Token::Atom(_) => '?',
    }
}
