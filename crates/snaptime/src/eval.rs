//! Applying instructions to timestamps.

use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::calendar::{self, Instant};
use crate::error::SnapError;
use crate::parser::parse;
use crate::transform::Token;

/// Options for [`snap_with_options`] and [`crate::unsnap::unsnap_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapOptions {
    /// IANA zone (`"America/Chicago"`) or fixed offset (`"+05:30"`) to
    /// evaluate in. `None` evaluates in the host's zone.
    pub zone: Option<String>,
}

impl SnapOptions {
    pub fn with_zone(zone: impl Into<String>) -> Self {
        Self { zone: Some(zone.into()) }
    }
}

/// Apply `instruction` to `timestamp` in the host's zone.
///
/// The host zone comes from `TZ`, then the system setting, then UTC. See
/// [`snap_with_options`].
///
/// # Examples
///
/// ```
/// use snaptime::snap;
///
/// std::env::set_var("TZ", "America/Chicago");
/// let start = snap("2023-09-26T12:35:31.337-05:00", "-7d@d").unwrap();
/// assert_eq!(start, "2023-09-19T00:00:00.000-05:00");
/// ```
pub fn snap(timestamp: &str, instruction: &str) -> Result<String, SnapError> {
    snap_with_options(timestamp, instruction, &SnapOptions::default())
}

/// Apply `instruction` to `timestamp` in the zone context given by `options`.
///
/// Tokens are applied left to right over a single zone context. An empty
/// instruction returns `timestamp` unchanged, byte for byte (after checking
/// that it parses). Otherwise the result is formatted as
/// `YYYY-MM-DDTHH:MM:SS.sss±HH:MM` with the offset in effect at the result,
/// which may differ from the input's across a DST transition.
///
/// # Errors
///
/// - [`SnapError::Parse`] if the timestamp is not strict ISO 8601 or the
///   instruction is malformed.
/// - [`SnapError::Unit`] for an unknown unit alias.
/// - [`SnapError::Transform`] if a step leaves the representable range.
/// - [`SnapError::InvalidTimezone`] if `options.zone` cannot be resolved.
///
/// Either the whole instruction applies or nothing is returned.
pub fn snap_with_options(
    timestamp: &str,
    instruction: &str,
    options: &SnapOptions,
) -> Result<String, SnapError> {
    let start = calendar::parse_timestamp(timestamp, options.zone.as_deref())?;
    if instruction.is_empty() {
        return Ok(timestamp.to_string());
    }

    let tokens = parse(instruction)?;
    let result = evaluate(&start, &tokens)?.format();
    debug!(timestamp, instruction, %result, "snapped");
    Ok(result)
}

/// Left-fold `tokens` over `start` in its zone context.
pub fn evaluate(start: &Instant, tokens: &[Token]) -> Result<Instant, SnapError> {
    match start {
        Instant::Fixed(dt) => apply_all(dt, tokens).map(Instant::Fixed),
        Instant::Zoned(dt) => apply_all(dt, tokens).map(Instant::Zoned),
    }
}

fn apply_all<T: TimeZone>(start: &DateTime<T>, tokens: &[Token]) -> Result<DateTime<T>, SnapError> {
    tokens.iter().try_fold(start.clone(), |dt, token| {
        let next = token.apply_to(&dt)?;
        trace!(%token, from = ?dt.naive_local(), to = ?next.naive_local(), "applied token");
        Ok(next)
    })
}
