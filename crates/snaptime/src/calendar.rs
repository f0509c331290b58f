//! Calendar primitives over `chrono` instants.
//!
//! This is the only module that talks to `chrono` and `chrono-tz` directly.
//! Everything above it (transformations, evaluator, unsnap) works through
//! these capabilities:
//!
//! - [`parse_timestamp`] — strict ISO 8601 → [`Instant`] in a zone context
//! - [`Instant::format`] / [`format`] — instant → ISO 8601 with millisecond precision
//! - [`start_of`] — truncate to the start of a calendar field
//! - [`plus`] — calendar-aware field addition (clamps to end of month)
//! - [`weekday`] — 0 = Sunday … 6 = Saturday
//! - [`diff`] / [`diff_instants`] — field-wise calendar difference, normalized largest-first
//!
//! # Zone context
//!
//! Day-level and larger arithmetic happens on the wall clock of the instant's
//! zone and is resolved back into that zone afterwards. A wall time inside a
//! DST gap is pushed forward by the gap length; an ambiguous wall time (DST
//! fall-back) resolves to the earlier instant.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    SecondsFormat, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::error::SnapError;
use crate::unit::Unit;

// ── Instant ─────────────────────────────────────────────────────────────────

/// A parsed timestamp in the zone context it will be evaluated in.
///
/// With a named zone (the host's by default) the offset follows that zone's
/// rules, so it may change across a DST transition during evaluation. A
/// fixed-offset override keeps one offset throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instant {
    Fixed(DateTime<FixedOffset>),
    Zoned(DateTime<Tz>),
}

impl Instant {
    /// Format as ISO 8601 with milliseconds, `Z` for a zero offset.
    pub fn format(&self) -> String {
        match self {
            Instant::Fixed(dt) => format(dt),
            Instant::Zoned(dt) => format(dt),
        }
    }

    /// The instant in UTC, for zone-independent comparison.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Instant::Fixed(dt) => dt.with_timezone(&Utc),
            Instant::Zoned(dt) => dt.with_timezone(&Utc),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// A zone context: the host's zone or an override given through options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

// ── parse / format ──────────────────────────────────────────────────────────

/// Parse a zone override: an IANA name (`"America/Chicago"`, `"UTC"`) or a
/// fixed offset (`"+05:30"`, `"-0600"`).
pub fn parse_zone(s: &str) -> Result<Zone, SnapError> {
    let s = s.trim();
    if s.starts_with('+') || s.starts_with('-') {
        return s
            .parse::<FixedOffset>()
            .map(Zone::Fixed)
            .map_err(|_| SnapError::InvalidTimezone(format!("'{s}'")));
    }
    if s == "Z" {
        return Ok(Zone::Fixed(Utc.fix()));
    }
    s.parse::<Tz>()
        .map(Zone::Named)
        .map_err(|_| SnapError::InvalidTimezone(format!("'{s}'")))
}

/// The host's zone: `TZ` when it names a zone, otherwise the system zone,
/// otherwise UTC.
pub fn host_zone() -> Zone {
    if let Ok(value) = std::env::var("TZ") {
        if let Some(zone) = zone_from_tz_var(&value) {
            return zone;
        }
        if !value.is_empty() {
            warn!(tz = %value, "TZ does not name a zone, falling back to the system zone");
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match name.parse::<Tz>() {
            Ok(tz) => return Zone::Named(tz),
            Err(_) => warn!(zone = %name, "unknown system zone, falling back to UTC"),
        },
        Err(e) => warn!(error = %e, "cannot read the system zone, falling back to UTC"),
    }
    Zone::Named(Tz::UTC)
}

/// Read a `TZ` value: an IANA name or fixed offset, optionally prefixed
/// with `:`.
fn zone_from_tz_var(value: &str) -> Option<Zone> {
    let value = value.strip_prefix(':').unwrap_or(value);
    if value.is_empty() {
        return None;
    }
    parse_zone(value).ok()
}

/// Parse a strict ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`1980-01-01T00:00:00.000-06:00`, `...Z`) and offset-less
/// local forms (`1980-01-15T14`, `1980-01-15T14:30`, `1980-01-15T14:30:00.5`,
/// `1980-01-15`). The instant is placed in `zone`, or in [`host_zone`] when
/// no zone is given; local forms are read on that zone's wall clock.
///
/// # Errors
///
/// Returns [`SnapError::Parse`] if the string is not one of the accepted
/// forms, or [`SnapError::InvalidTimezone`] if `zone` cannot be resolved.
pub fn parse_timestamp(s: &str, zone: Option<&str>) -> Result<Instant, SnapError> {
    let zone = match zone {
        Some(zone) => parse_zone(zone)?,
        None => host_zone(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(match zone {
            Zone::Fixed(offset) => Instant::Fixed(dt.with_timezone(&offset)),
            Zone::Named(tz) => Instant::Zoned(dt.with_timezone(&tz)),
        });
    }

    let naive = parse_local(s).ok_or_else(|| {
        SnapError::Parse(format!(
            "Invalid date supplied, unable to parse. Please use ISO 8601 format: '{s}'"
        ))
    })?;

    match zone {
        Zone::Fixed(offset) => resolve_local(&offset, naive).map(Instant::Fixed),
        Zone::Named(tz) => resolve_local(&tz, naive).map(Instant::Zoned),
    }
}

/// Offset-less ISO 8601 date or date-time.
fn parse_local(s: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = match s.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };
    if date_part.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(t) if t.len() == 2 && t.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveTime::from_hms_opt(t.parse().ok()?, 0, 0)?
        }
        Some(t) if t.len() == 5 => NaiveTime::parse_from_str(t, "%H:%M").ok()?,
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S%.f").ok()?,
    };
    Some(date.and_time(time))
}

/// Format as ISO 8601 with millisecond precision, preserving the offset in
/// effect at that instant.
pub fn format<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── field arithmetic ────────────────────────────────────────────────────────

/// Map a wall-clock time back into `tz`.
fn resolve_local<T: TimeZone>(tz: &T, naive: NaiveDateTime) -> Result<DateTime<T>, SnapError> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            // DST gap: read the wall time with the offset in effect before the gap.
            let before = naive
                .checked_sub_signed(TimeDelta::days(1))
                .map(|probe| tz.offset_from_utc_datetime(&probe).fix())
                .ok_or_else(|| out_of_range(&naive))?;
            let utc = naive
                .checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))
                .ok_or_else(|| out_of_range(&naive))?;
            Ok(tz.from_utc_datetime(&utc))
        }
    }
}

fn out_of_range(what: &dyn fmt::Debug) -> SnapError {
    SnapError::Transform(format!("result is outside the representable range: {what:?}"))
}

/// Truncate to the start of `unit`'s calendar field.
///
/// Sub-day units subtract the elapsed part of the field, so an instant inside
/// a repeated DST hour stays in the same occurrence of that hour. Weeks are
/// not a calendar field of their own; they truncate like days.
pub fn start_of<T: TimeZone>(dt: &DateTime<T>, unit: Unit) -> Result<DateTime<T>, SnapError> {
    let nanos = i64::from(dt.nanosecond() % 1_000_000_000);
    let elapsed = match unit {
        Unit::Milliseconds => Some(nanos % 1_000_000),
        Unit::Seconds => Some(nanos),
        Unit::Minutes => Some(i64::from(dt.second()) * 1_000_000_000 + nanos),
        Unit::Hours => {
            Some((i64::from(dt.minute()) * 60 + i64::from(dt.second())) * 1_000_000_000 + nanos)
        }
        Unit::Days | Unit::Weeks | Unit::Months | Unit::Years => None,
    };
    if let Some(elapsed) = elapsed {
        return dt
            .clone()
            .checked_sub_signed(TimeDelta::nanoseconds(elapsed))
            .ok_or_else(|| out_of_range(&dt.naive_local()));
    }

    let date = dt.date_naive();
    let start = match unit {
        Unit::Months => date.with_day(1),
        Unit::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        _ => Some(date),
    }
    .ok_or_else(|| out_of_range(&date))?;
    resolve_local(&dt.timezone(), start.and_time(NaiveTime::MIN))
}

/// Add `amount` of `unit`.
///
/// Milliseconds through hours are exact elapsed time. Days and weeks move
/// the wall-clock date and keep the time of day. Months and years move the
/// month and clamp the day to the last day of the resulting month, so
/// Jan 31 + 1 month is Feb 28 (Feb 29 in a leap year).
///
/// # Errors
///
/// Returns [`SnapError::Transform`] if the amount overflows the arithmetic or
/// the result is outside the representable range.
pub fn plus<T: TimeZone>(dt: &DateTime<T>, unit: Unit, amount: i64) -> Result<DateTime<T>, SnapError> {
    let overflow = || {
        SnapError::Transform(format!(
            "cannot add {amount} {unit}: result is outside the representable range"
        ))
    };

    let exact = match unit {
        Unit::Milliseconds => Some(TimeDelta::try_milliseconds(amount)),
        Unit::Seconds => Some(TimeDelta::try_seconds(amount)),
        Unit::Minutes => Some(TimeDelta::try_minutes(amount)),
        Unit::Hours => Some(TimeDelta::try_hours(amount)),
        Unit::Days | Unit::Weeks | Unit::Months | Unit::Years => None,
    };
    if let Some(delta) = exact {
        return delta
            .and_then(|delta| dt.clone().checked_add_signed(delta))
            .ok_or_else(overflow);
    }

    let local = dt.naive_local();
    let date = match unit {
        Unit::Weeks => add_days(local.date(), amount.checked_mul(7).ok_or_else(overflow)?),
        Unit::Days => add_days(local.date(), amount),
        Unit::Years => add_months(local.date(), amount.checked_mul(12).ok_or_else(overflow)?),
        _ => add_months(local.date(), amount),
    }
    .ok_or_else(overflow)?;
    resolve_local(&dt.timezone(), date.and_time(local.time()))
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = (i64::from(date.year()) * 12 + i64::from(date.month0())).checked_add(months)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}

/// Day of the week on the instant's wall clock, 0 = Sunday … 6 = Saturday.
pub fn weekday<T: TimeZone>(dt: &DateTime<T>) -> u32 {
    dt.weekday().num_days_from_sunday()
}

// ── diff / normalize ────────────────────────────────────────────────────────

/// A mixed-unit calendar duration. Every non-zero field carries the sign of
/// the overall difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CalendarDiff {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl CalendarDiff {
    pub fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Years => self.years,
            Unit::Months => self.months,
            Unit::Weeks => self.weeks,
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
            Unit::Milliseconds => self.milliseconds,
        }
    }

    fn set(&mut self, unit: Unit, value: i64) {
        let field = match unit {
            Unit::Years => &mut self.years,
            Unit::Months => &mut self.months,
            Unit::Weeks => &mut self.weeks,
            Unit::Days => &mut self.days,
            Unit::Hours => &mut self.hours,
            Unit::Minutes => &mut self.minutes,
            Unit::Seconds => &mut self.seconds,
            Unit::Milliseconds => &mut self.milliseconds,
        };
        *field = value;
    }

    pub fn is_zero(&self) -> bool {
        Unit::DESCENDING.iter().all(|unit| self.get(*unit) == 0)
    }

    /// Units with a non-zero field, coarsest first.
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        Unit::DESCENDING
            .into_iter()
            .filter(move |unit| self.get(*unit) != 0)
    }

    /// Redistribute so each field holds its maximal whole count: 12 months
    /// carry into a year, 7 days into a week, and the exact sub-day fields
    /// carry upward through milliseconds → seconds → minutes → hours.
    ///
    /// Hours never carry into days: a calendar day is not a fixed 24 hours
    /// across a DST transition.
    pub fn normalize(self) -> CalendarDiff {
        let sub_day = ((self.hours * 60 + self.minutes) * 60 + self.seconds) * 1000 + self.milliseconds;
        let days = self.weeks * 7 + self.days;
        let months = self.years * 12 + self.months;
        CalendarDiff {
            years: months / 12,
            months: months % 12,
            weeks: days / 7,
            days: days % 7,
            hours: sub_day / 3_600_000,
            minutes: sub_day % 3_600_000 / 60_000,
            seconds: sub_day % 60_000 / 1000,
            milliseconds: sub_day % 1000,
        }
    }
}

/// Field-wise calendar difference walked from `anchor` toward `target`.
///
/// Years, months, weeks and days are taken with [`plus`], backing off while
/// a step overshoots the target; whatever remains is exact elapsed time split
/// into hours, minutes, seconds and milliseconds. Applying the non-zero
/// fields to `anchor` in that order (years first) lands on `target` except
/// where a month clamp or DST resolution intervenes.
pub fn diff<T: TimeZone>(anchor: &DateTime<T>, target: &DateTime<T>) -> CalendarDiff {
    let sign: i64 = if target >= anchor { 1 } else { -1 };
    let overshoots = |next: &DateTime<T>| {
        if sign > 0 {
            next > target
        } else {
            next < target
        }
    };

    let mut cursor = anchor.clone();
    let mut out = CalendarDiff::default();

    for unit in [Unit::Years, Unit::Months, Unit::Weeks, Unit::Days] {
        let mut n = estimate(unit, &cursor, target);
        if n.signum() == -sign {
            n = 0;
        }
        while n != 0 {
            match plus(&cursor, unit, n) {
                Ok(next) if !overshoots(&next) => {
                    cursor = next;
                    break;
                }
                _ => n -= sign,
            }
        }
        out.set(unit, n);
    }

    out.milliseconds = (target.clone() - cursor).num_milliseconds();
    out.normalize()
}

/// [`diff`] between two parsed instants, walked on the anchor's wall clock.
pub fn diff_instants(anchor: &Instant, target: &Instant) -> CalendarDiff {
    let target = target.to_utc();
    match anchor {
        Instant::Fixed(a) => diff(a, &target.with_timezone(&a.timezone())),
        Instant::Zoned(a) => diff(a, &target.with_timezone(&a.timezone())),
    }
}

/// First guess for how many whole `unit`s separate the two wall clocks.
fn estimate<T: TimeZone>(unit: Unit, from: &DateTime<T>, to: &DateTime<T>) -> i64 {
    let (a, b) = (from.date_naive(), to.date_naive());
    match unit {
        Unit::Years => i64::from(b.year()) - i64::from(a.year()),
        Unit::Months => {
            (i64::from(b.year()) - i64::from(a.year())) * 12 + i64::from(b.month()) - i64::from(a.month())
        }
        Unit::Weeks => (b - a).num_days() / 7,
        _ => (b - a).num_days(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::host_in_chicago;

    fn fixed(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn chicago(s: &str) -> DateTime<Tz> {
        fixed(s).with_timezone(&chrono_tz::America::Chicago)
    }

    // ── parse_timestamp / format ────────────────────────────────────────

    #[test]
    fn test_parse_defaults_to_host_zone() {
        host_in_chicago();
        let instant = parse_timestamp("2023-09-26T12:35:31.337-07:00", None).unwrap();
        assert_eq!(instant.format(), "2023-09-26T14:35:31.337-05:00");
        assert!(matches!(instant, Instant::Zoned(_)));
    }

    #[test]
    fn test_host_zone_reads_tz() {
        host_in_chicago();
        assert_eq!(host_zone(), Zone::Named(chrono_tz::America::Chicago));
    }

    #[test]
    fn test_tz_var_forms() {
        assert_eq!(
            zone_from_tz_var(":Europe/Paris"),
            Some(Zone::Named(chrono_tz::Europe::Paris))
        );
        assert_eq!(
            zone_from_tz_var("+05:30"),
            Some(Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()))
        );
        assert_eq!(zone_from_tz_var(""), None);
        assert_eq!(zone_from_tz_var(":"), None);
        assert_eq!(zone_from_tz_var("Not/AZone"), None);
    }

    #[test]
    fn test_parse_fixed_zone_adds_milliseconds() {
        let instant = parse_timestamp("2023-09-24T00:00:00-05:00", Some("-05:00")).unwrap();
        assert_eq!(instant.format(), "2023-09-24T00:00:00.000-05:00");
        assert!(matches!(instant, Instant::Fixed(_)));
    }

    #[test]
    fn test_parse_utc_formats_as_z() {
        let instant = parse_timestamp("2026-03-15T14:00:00Z", Some("UTC")).unwrap();
        assert_eq!(instant.format(), "2026-03-15T14:00:00.000Z");
    }

    #[test]
    fn test_parse_with_named_zone_converts() {
        let instant =
            parse_timestamp("2023-09-26T12:35:31.337-07:00", Some("America/Chicago")).unwrap();
        assert_eq!(instant.format(), "2023-09-26T14:35:31.337-05:00");
        assert!(matches!(instant, Instant::Zoned(_)));
    }

    #[test]
    fn test_parse_with_fixed_zone() {
        let instant = parse_timestamp("2026-03-15T14:00:00Z", Some("+05:30")).unwrap();
        assert_eq!(instant.format(), "2026-03-15T19:30:00.000+05:30");
    }

    #[test]
    fn test_parse_local_hour_only() {
        let instant = parse_timestamp("1980-01-15T14", Some("America/Chicago")).unwrap();
        assert_eq!(instant.format(), "1980-01-15T14:00:00.000-06:00");
    }

    #[test]
    fn test_parse_local_forms_read_on_host_wall_clock() {
        host_in_chicago();
        assert_eq!(
            parse_timestamp("1980-01-15T14:30", None).unwrap().format(),
            "1980-01-15T14:30:00.000-06:00"
        );
        assert_eq!(
            parse_timestamp("1980-07-15T14:30:15.25", None).unwrap().format(),
            "1980-07-15T14:30:15.250-05:00"
        );
        assert_eq!(
            parse_timestamp("1980-01-15", Some("UTC")).unwrap().format(),
            "1980-01-15T00:00:00.000Z"
        );
    }

    #[test]
    fn test_parse_rejects_free_form_dates() {
        let err = parse_timestamp(
            "Wed Aug 23 2023 12:26:40 GMT-0500 (Central Daylight Time)",
            Some("UTC"),
        )
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("Invalid date supplied, unable to parse. Please use ISO 8601 format"),
            "got: {err}"
        );
        assert!(parse_timestamp("", Some("UTC")).is_err());
        assert!(parse_timestamp("1980-1-5", Some("UTC")).is_err());
        assert!(parse_timestamp("1980-01-15T2", Some("UTC")).is_err());
    }

    #[test]
    fn test_parse_invalid_zone() {
        let err = parse_timestamp("2026-03-15T14:00:00Z", Some("Invalid/Zone")).unwrap_err();
        assert!(matches!(err, SnapError::InvalidTimezone(_)));
        assert!(parse_zone("+99:99").is_err());
    }

    // ── start_of ────────────────────────────────────────────────────────

    #[test]
    fn test_start_of_each_field() {
        let dt = fixed("1980-07-15T14:23:45.678-06:00");
        let cases = [
            (Unit::Milliseconds, "1980-07-15T14:23:45.678-06:00"),
            (Unit::Seconds, "1980-07-15T14:23:45.000-06:00"),
            (Unit::Minutes, "1980-07-15T14:23:00.000-06:00"),
            (Unit::Hours, "1980-07-15T14:00:00.000-06:00"),
            (Unit::Days, "1980-07-15T00:00:00.000-06:00"),
            (Unit::Months, "1980-07-01T00:00:00.000-06:00"),
            (Unit::Years, "1980-01-01T00:00:00.000-06:00"),
        ];
        for (unit, expected) in cases {
            assert_eq!(format(&start_of(&dt, unit).unwrap()), expected, "{unit}");
        }
    }

    #[test]
    fn test_start_of_year_crosses_dst_offset() {
        let dt = chicago("2023-07-04T12:00:00-05:00");
        let start = start_of(&dt, Unit::Years).unwrap();
        assert_eq!(format(&start), "2023-01-01T00:00:00.000-06:00");
    }

    #[test]
    fn test_start_of_hour_in_repeated_hour_keeps_occurrence() {
        // 2023-11-05 01:30 CST is the second 01:30 of the night.
        let dt = chicago("2023-11-05T01:30:00-06:00");
        let start = start_of(&dt, Unit::Hours).unwrap();
        assert_eq!(format(&start), "2023-11-05T01:00:00.000-06:00");
    }

    // ── plus ────────────────────────────────────────────────────────────

    #[test]
    fn test_plus_month_clamps_to_end_of_month() {
        let dt = fixed("1980-01-31T00:00:00-06:00");
        assert_eq!(
            format(&plus(&dt, Unit::Months, 1).unwrap()),
            "1980-02-29T00:00:00.000-06:00"
        );
        let dt = fixed("1981-01-31T00:00:00-06:00");
        assert_eq!(
            format(&plus(&dt, Unit::Months, 1).unwrap()),
            "1981-02-28T00:00:00.000-06:00"
        );
    }

    #[test]
    fn test_plus_negative_months_across_year() {
        let dt = fixed("1980-01-15T00:00:00-06:00");
        assert_eq!(
            format(&plus(&dt, Unit::Months, -13).unwrap()),
            "1978-12-15T00:00:00.000-06:00"
        );
    }

    #[test]
    fn test_plus_year_from_leap_day_clamps() {
        let dt = fixed("2020-02-29T12:00:00Z");
        assert_eq!(
            format(&plus(&dt, Unit::Years, 1).unwrap()),
            "2021-02-28T12:00:00.000Z"
        );
    }

    #[test]
    fn test_plus_weeks_is_seven_days() {
        let dt = fixed("1980-01-01T00:00:00-06:00");
        assert_eq!(plus(&dt, Unit::Weeks, 3).unwrap(), plus(&dt, Unit::Days, 21).unwrap());
    }

    #[test]
    fn test_plus_day_keeps_wall_clock_across_dst() {
        // 2023-03-12: US spring forward.
        let dt = chicago("2023-03-11T09:00:00-06:00");
        let next = plus(&dt, Unit::Days, 1).unwrap();
        assert_eq!(format(&next), "2023-03-12T09:00:00.000-05:00");
    }

    #[test]
    fn test_plus_hours_is_elapsed_time_across_dst() {
        let dt = chicago("2023-03-11T09:00:00-06:00");
        let next = plus(&dt, Unit::Hours, 24).unwrap();
        assert_eq!(format(&next), "2023-03-12T10:00:00.000-05:00");
    }

    #[test]
    fn test_plus_into_dst_gap_moves_forward() {
        let dt = chicago("2023-03-11T02:30:00-06:00");
        let next = plus(&dt, Unit::Days, 1).unwrap();
        assert_eq!(format(&next), "2023-03-12T03:30:00.000-05:00");
    }

    #[test]
    fn test_plus_overflow_is_transform_error() {
        let dt = fixed("1980-01-01T00:00:00Z");
        assert!(matches!(
            plus(&dt, Unit::Years, i64::MAX),
            Err(SnapError::Transform(_))
        ));
        assert!(matches!(
            plus(&dt, Unit::Days, 1_000_000_000_000),
            Err(SnapError::Transform(_))
        ));
        assert!(matches!(
            plus(&dt, Unit::Milliseconds, i64::MIN),
            Err(SnapError::Transform(_))
        ));
    }

    // ── weekday ─────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_sunday_is_zero() {
        assert_eq!(weekday(&fixed("1980-01-06T00:00:00Z")), 0);
        assert_eq!(weekday(&fixed("1980-01-05T00:00:00Z")), 6);
    }

    #[test]
    fn test_weekday_uses_wall_clock() {
        // Saturday 23:00 in Chicago is already Sunday in UTC.
        assert_eq!(weekday(&fixed("1980-01-05T23:00:00-06:00")), 6);
    }

    // ── diff / normalize ────────────────────────────────────────────────

    #[test]
    fn test_diff_one_week() {
        let d = diff(
            &fixed("2023-09-24T00:00:00-05:00"),
            &fixed("2023-10-01T00:00:00-05:00"),
        );
        assert_eq!(d, CalendarDiff { weeks: 1, ..Default::default() });
    }

    #[test]
    fn test_diff_months_weeks_days() {
        let d = diff(
            &fixed("2023-01-01T00:00:00-05:00"),
            &fixed("2023-12-31T00:00:00-05:00"),
        );
        assert_eq!(
            d,
            CalendarDiff { months: 11, weeks: 4, days: 2, ..Default::default() }
        );
    }

    #[test]
    fn test_diff_negative_carries_sign_on_every_field() {
        let d = diff(
            &fixed("2023-09-25T23:59:59-05:00"),
            &fixed("2023-09-24T00:00:00-05:00"),
        );
        assert_eq!(
            d,
            CalendarDiff { days: -1, hours: -23, minutes: -59, seconds: -59, ..Default::default() }
        );
    }

    #[test]
    fn test_diff_backs_off_month_overshoot() {
        let d = diff(
            &fixed("2023-01-31T23:00:00Z"),
            &fixed("2023-02-01T01:00:00Z"),
        );
        assert_eq!(d, CalendarDiff { hours: 2, ..Default::default() });
    }

    #[test]
    fn test_diff_identical_is_zero() {
        let dt = fixed("2023-09-24T00:00:00-05:00");
        assert!(diff(&dt, &dt).is_zero());
    }

    #[test]
    fn test_normalize_carries_largest_first() {
        let d = CalendarDiff { months: 14, days: 10, minutes: 90, milliseconds: 2500, ..Default::default() };
        assert_eq!(
            d.normalize(),
            CalendarDiff {
                years: 1,
                months: 2,
                weeks: 1,
                days: 3,
                hours: 1,
                minutes: 30,
                seconds: 2,
                milliseconds: 500,
            }
        );
    }

    #[test]
    fn test_units_lists_non_zero_coarsest_first() {
        let d = CalendarDiff { years: 1, days: -2, milliseconds: 5, ..Default::default() };
        let units: Vec<Unit> = d.units().collect();
        assert_eq!(units, vec![Unit::Years, Unit::Days, Unit::Milliseconds]);
    }
}
