//! The two transformation kinds and the token that carries either.

pub mod delta;
pub mod snap;

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub use delta::{Delta, Sign};
pub use snap::Snap;

use crate::error::SnapError;

/// One parsed step of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
    Delta(Delta),
    Snap(Snap),
}

impl Token {
    pub fn apply_to<T: TimeZone>(&self, dt: &DateTime<T>) -> Result<DateTime<T>, SnapError> {
        match self {
            Token::Delta(delta) => delta.apply_to(dt),
            Token::Snap(snap) => snap.apply_to(dt),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Delta(delta) => fmt::Display::fmt(delta, f),
            Token::Snap(snap) => fmt::Display::fmt(snap, f),
        }
    }
}

impl From<Delta> for Token {
    fn from(delta: Delta) -> Self {
        Token::Delta(delta)
    }
}

impl From<Snap> for Token {
    fn from(snap: Snap) -> Self {
        Token::Snap(snap)
    }
}

/// Render tokens back into instruction text.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}
