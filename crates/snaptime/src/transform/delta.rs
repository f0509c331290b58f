//! Signed offsets: `+3d`, `-1mon`, `90m`.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::SnapError;
use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// Shift an instant by `sign * magnitude` of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub sign: Sign,
    pub magnitude: u64,
    pub unit: Unit,
}

impl Delta {
    pub fn new(sign: Sign, magnitude: u64, unit: Unit) -> Self {
        Self { sign, magnitude, unit }
    }

    /// The signed amount as an `i64`, or `None` if it does not fit.
    pub fn amount(&self) -> Option<i64> {
        let magnitude = i64::try_from(self.magnitude).ok()?;
        Some(match self.sign {
            Sign::Plus => magnitude,
            Sign::Minus => -magnitude,
        })
    }

    /// Apply the offset with calendar-aware addition.
    ///
    /// Months and years clamp to the end of a shorter target month, so this
    /// is not invertible: `1980-01-31 +1mon -1mon` is `1980-01-29`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::Transform`] if the magnitude does not fit the
    /// arithmetic or the result is outside the representable range.
    pub fn apply_to<T: TimeZone>(&self, dt: &DateTime<T>) -> Result<DateTime<T>, SnapError> {
        let amount = self
            .amount()
            .ok_or_else(|| SnapError::Transform(format!("magnitude too large in '{self}'")))?;
        calendar::plus(dt, self.unit, amount)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.sign.as_char(), self.magnitude, self.unit.abbrev())
    }
}
