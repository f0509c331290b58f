//! Alignment to a calendar boundary: `@d`, `@mon`, `@w1`.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::SnapError;
use crate::unit::Unit;

/// Truncate to the start of `unit`, or for weeks align back to a weekday.
///
/// `weekday` is only ever set for [`Unit::Weeks`]; the parser rejects it on
/// any other unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snap {
    pub unit: Unit,
    pub weekday: Option<u32>,
}

impl Snap {
    pub fn new(unit: Unit) -> Self {
        Self { unit, weekday: None }
    }

    pub fn on_weekday(weekday: u32) -> Self {
        Self { unit: Unit::Weeks, weekday: Some(weekday) }
    }

    /// Apply the alignment.
    ///
    /// For weeks the instant moves back `(weekday(dt) - W + 7) % 7` days, with
    /// W = 0 (Sunday) when no weekday was given, then truncates to the start
    /// of that day. It never moves forward; `7` behaves like `0`.
    pub fn apply_to<T: TimeZone>(&self, dt: &DateTime<T>) -> Result<DateTime<T>, SnapError> {
        match self.unit {
            Unit::Weeks => {
                let target = self.weekday.unwrap_or(0);
                let shift = (calendar::weekday(dt) + 7 - target % 7) % 7;
                let aligned = calendar::plus(dt, Unit::Days, -i64::from(shift))?;
                calendar::start_of(&aligned, Unit::Days)
            }
            unit => calendar::start_of(dt, unit),
        }
    }
}

impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.unit.abbrev())?;
        if let Some(weekday) = self.weekday {
            write!(f, "{weekday}")?;
        }
        Ok(())
    }
}
