//! Tokenization for Brewin
//!
//! Every source line is split independently into whitespace-separated
//! tokens. A double-quoted string is kept as a single token, quotes
//! included, so later stages can recognise it as a string literal.
//! Everything after a `#` outside of quotes is a comment.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, recognize},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Parse a double-quoted string, keeping the quotes
fn quoted_string(input: &str) -> IResult<&str, String> {
    map(
        recognize(delimited(char('"'), take_while(|c| c != '"'), char('"'))),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a bare word (keyword, name, literal, operator)
fn word(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '"' && c != '#'),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, String> {
    preceded(multispace0, alt((quoted_string, word)))(input)
}

/// Tokenize one source line.
///
/// Blank and comment-only lines produce an empty vector.
pub fn tokenize_line(line: &str) -> Result<Vec<String>, LexError> {
    let (remaining, tokens) =
        many0(token)(line).map_err(|e| LexError::ParseError(format!("{:?}", e)))?;

    let remaining = remaining.trim_start();
    match remaining.chars().next() {
        None | Some('#') => Ok(tokens),
        Some('"') => Err(LexError::UnterminatedString),
        Some(c) => Err(LexError::UnexpectedChar(c)),
    }
}

/// Tokenize a whole program, one entry per source line.
///
/// On failure the zero-based index of the offending line is returned
/// alongside the error.
pub fn tokenize(source: &str) -> Result<Vec<Vec<String>>, (usize, LexError)> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| tokenize_line(line).map_err(|e| (index, e)))
        .collect()
}
