//! The eight canonical time units and their aliases.
//!
//! Alias lookup is exact and case-sensitive: `"d"` is days, `"D"` is an
//! error. There is no prefix matching and no normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SnapError;

/// A canonical time unit, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

/// Canonical unit → accepted aliases. The first alias is the one used when
/// rendering instructions.
const UNIT_ALIASES: [(Unit, &[&str]); 8] = [
    (Unit::Milliseconds, &["ms"]),
    (Unit::Seconds, &["s", "sec", "secs", "second", "seconds"]),
    (Unit::Minutes, &["m", "min", "minute", "minutes"]),
    (Unit::Hours, &["h", "hr", "hrs", "hour", "hours"]),
    (Unit::Days, &["d", "day", "days"]),
    (Unit::Weeks, &["w", "week", "weeks"]),
    (Unit::Months, &["mon", "month", "months"]),
    (Unit::Years, &["y", "yr", "yrs", "year", "years"]),
];

impl Unit {
    /// All units, coarsest first. This is the order of rendered delta chains.
    pub const DESCENDING: [Unit; 8] = [
        Unit::Years,
        Unit::Months,
        Unit::Weeks,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
        Unit::Milliseconds,
    ];

    /// The canonical key, e.g. `"days"`.
    pub fn key(self) -> &'static str {
        match self {
            Unit::Milliseconds => "milliseconds",
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Months => "months",
            Unit::Years => "years",
        }
    }

    /// Every alias this unit accepts.
    pub fn aliases(self) -> &'static [&'static str] {
        UNIT_ALIASES
            .iter()
            .find(|(unit, _)| *unit == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// The shortest alias (`"d"`, `"mon"`, `"ms"`), used for rendering.
    pub fn abbrev(self) -> &'static str {
        self.aliases().first().copied().unwrap_or_else(|| self.key())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Unit {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_unit(s)
    }
}

/// Resolve an alias to its canonical unit.
///
/// # Errors
///
/// Returns [`SnapError::Unit`] naming the alias if no unit declares it.
///
/// # Examples
///
/// ```
/// use snaptime::unit::{get_unit, Unit};
///
/// assert_eq!(get_unit("mon").unwrap(), Unit::Months);
/// assert!(get_unit("Mon").is_err());
/// ```
pub fn get_unit(alias: &str) -> Result<Unit, SnapError> {
    UNIT_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&alias))
        .map(|(unit, _)| *unit)
        .ok_or_else(|| SnapError::Unit(format!("Unknown unit string '{alias}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_unit() {
        for (unit, aliases) in UNIT_ALIASES {
            for alias in aliases {
                assert_eq!(get_unit(alias).unwrap(), unit, "alias {alias}");
            }
        }
    }

    #[test]
    fn test_aliases_are_unique_across_units() {
        let mut seen = std::collections::HashSet::new();
        for (_, aliases) in UNIT_ALIASES {
            for alias in aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(get_unit("D").is_err());
        assert!(get_unit("Days").is_err());
        assert!(get_unit("MS").is_err());
    }

    #[test]
    fn test_no_prefix_matching() {
        assert!(get_unit("mo").is_err());
        assert!(get_unit("dayz").is_err());
        assert!(get_unit("").is_err());
    }

    #[test]
    fn test_unknown_alias_names_the_alias() {
        let err = get_unit("z").unwrap_err();
        assert_eq!(err, SnapError::Unit("Unknown unit string 'z'".to_string()));
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_abbrev_is_first_alias() {
        assert_eq!(Unit::Months.abbrev(), "mon");
        assert_eq!(Unit::Minutes.abbrev(), "m");
        assert_eq!(Unit::Milliseconds.abbrev(), "ms");
        assert_eq!(Unit::Weeks.abbrev(), "w");
    }

    #[test]
    fn test_descending_order_matches_ord() {
        let mut sorted = Unit::DESCENDING;
        sorted.sort();
        sorted.reverse();
        assert_eq!(sorted, Unit::DESCENDING);
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Unit::Hours.to_string(), "hours");
        assert_eq!("hrs".parse::<Unit>().unwrap(), Unit::Hours);
    }

    #[test]
    fn test_serializes_as_canonical_key() {
        let json = serde_json::to_string(&Unit::Weeks).unwrap();
        assert_eq!(json, "\"weeks\"");
    }
}
