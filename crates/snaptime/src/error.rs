//! Error types for snaptime operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapError {
    /// Malformed instruction or timestamp. The message cites the offending text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An alias that no unit declares.
    #[error("Unit error: {0}")]
    Unit(String),

    /// A token could not be applied, or the arithmetic left the representable range.
    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, SnapError>;
