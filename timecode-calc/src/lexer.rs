//! Splits expression text into operators, parentheses and timecode atoms.
//!
//! An atom is the trimmed text between two operators, so `1h 30m + 10f`
//! has two atoms: `1h 30m` and `10f`. Atoms are handed to the timecode
//! parser unchanged.

use crate::error::{CalcError, Result};
use std::fmt;

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Timecode or number text.
    Atom(&'a str),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl Token<'_> {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Atom(text) => f.write_str(text),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Tokenize `input`, failing once more than `max_tokens` tokens are produced.
pub fn tokenize(input: &str, max_tokens: usize) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut atom_start = 0;

    for (pos, c) in input.char_indices() {
        if let Some(op) = Token::from_char(c) {
            push_atom(&mut tokens, &input[atom_start..pos], max_tokens)?;
            push(&mut tokens, op, max_tokens)?;
            atom_start = pos + c.len_utf8();
        }
    }
    push_atom(&mut tokens, &input[atom_start..], max_tokens)?;

    Ok(tokens)
}

fn push_atom<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str, max: usize) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    push(tokens, Token::Atom(text), max)
}

fn push<'a>(tokens: &mut Vec<Token<'a>>, token: Token<'a>, max: usize) -> Result<()> {
    if tokens.len() >= max {
        return Err(CalcError::TooManyTokens {
            count: tokens.len() + 1,
            max,
        });
    }
    tokens.push(token);
    Ok(())
}
