//! Instruction lexer.
//!
//! ```text
//! instruction   := (snapToken | deltaToken)*
//! snapToken     := "@" unitAlias weekdayDigits?
//! deltaToken    := sign? digits unitAlias
//! ```
//!
//! At each position a snap head (`@<letters><digits>`) is tried first, then a
//! delta head (`<sign><digits><letters>`). A delta head never starts with
//! `@`, so the two never compete for the same input.

use tracing::trace;

use crate::error::SnapError;
use crate::transform::{Delta, Sign, Snap, Token};
use crate::unit::{get_unit, Unit};

/// Parse an instruction into its ordered tokens.
///
/// An empty instruction yields no tokens.
///
/// # Errors
///
/// - [`SnapError::Parse`] if the head of the remaining input matches neither
///   pattern, weekday digits follow a non-week unit, or a weekday is outside
///   `0..=7`.
/// - [`SnapError::Unit`] if an alias does not name a unit.
///
/// Magnitudes are unbounded at parse time. One past `u64::MAX` saturates and
/// fails with [`SnapError::Transform`] when applied, like any other
/// out-of-range step.
///
/// # Examples
///
/// ```
/// use snaptime::parser::parse;
///
/// let tokens = parse("-7d@d").unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert!(parse("@").is_err());
/// ```
pub fn parse(instruction: &str) -> Result<Vec<Token>, SnapError> {
    let mut tokens = Vec::new();
    let mut rest = instruction;

    while !rest.is_empty() {
        let (token, tail) = match rest.strip_prefix('@') {
            Some(after_at) => lex_snap(instruction, rest, after_at)?,
            None => lex_delta(instruction, rest)?,
        };
        tokens.push(token);
        rest = tail;
    }

    trace!(instruction, tokens = tokens.len(), "parsed instruction");
    Ok(tokens)
}

fn unmatched(instruction: &str, rest: &str) -> SnapError {
    SnapError::Parse(format!(
        "Cannot parse instruction '{instruction}'. There is an error at '{rest}'"
    ))
}

/// Split `s` after the longest prefix whose chars satisfy `pred`.
fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn lex_snap<'a>(
    instruction: &str,
    rest: &'a str,
    after_at: &'a str,
) -> Result<(Token, &'a str), SnapError> {
    let (letters, after_letters) = split_while(after_at, |c| c.is_ascii_alphabetic());
    if letters.is_empty() {
        return Err(unmatched(instruction, rest));
    }
    let unit = get_unit(letters)?;
    let (digits, tail) = split_while(after_letters, |c| c.is_ascii_digit());

    if digits.is_empty() {
        return Ok((Snap::new(unit).into(), tail));
    }
    if unit != Unit::Weeks {
        // Weekday digits only belong to weeks; anywhere else they are
        // unparseable leftovers.
        return Err(unmatched(instruction, after_letters));
    }
    let weekday = digits
        .parse::<u32>()
        .ok()
        .filter(|w| *w <= 7)
        .ok_or_else(|| SnapError::Parse(format!("Bad weekday '{digits}'")))?;
    Ok((Snap::on_weekday(weekday).into(), tail))
}

fn lex_delta<'a>(instruction: &str, rest: &'a str) -> Result<(Token, &'a str), SnapError> {
    let (sign, unsigned) = match rest.as_bytes().first() {
        Some(b'+') => (Sign::Plus, &rest[1..]),
        Some(b'-') => (Sign::Minus, &rest[1..]),
        _ => (Sign::Plus, rest),
    };
    let (digits, after_digits) = split_while(unsigned, |c| c.is_ascii_digit());
    let (letters, tail) = split_while(after_digits, |c| c.is_ascii_alphabetic());
    if digits.is_empty() || letters.is_empty() {
        return Err(unmatched(instruction, rest));
    }

    // `digits` is non-empty ASCII, so the only failure is overflow.
    let magnitude = digits.parse::<u64>().unwrap_or(u64::MAX);
    let unit = get_unit(letters)?;
    Ok((Delta::new(sign, magnitude, unit).into(), tail))
}
