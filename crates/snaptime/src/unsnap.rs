//! Reconstructing an instruction from two instants.
//!
//! The calendar difference from anchor to target is rendered as a chain of
//! deltas (`-1d-23h-59m-59s`). Each unit present in the chain is then tried
//! as a collapse point ([`snap_descendants`]), and a collapsed candidate is
//! kept when its formatted result equals the formatted target and it is no
//! longer than the best instruction so far. Collapses are tried one at a time and never combined,
//! so this is a greedy search, not a minimal one.

use tracing::{debug, trace};

use crate::calendar::{self, CalendarDiff, Instant};
use crate::error::SnapError;
use crate::eval::{evaluate, SnapOptions};
use crate::parser::parse;
use crate::transform::{render, Delta, Sign, Snap, Token};
use crate::unit::Unit;

/// Find an instruction that takes `anchor` to `target`.
///
/// See [`unsnap_with_options`].
///
/// # Examples
///
/// ```
/// use snaptime::unsnap;
///
/// std::env::set_var("TZ", "America/Chicago");
/// let instruction = unsnap("2023-09-24T00:00:00-05:00", "2023-09-25T23:59:59-05:00").unwrap();
/// assert_eq!(instruction, "-1d@d");
/// ```
pub fn unsnap(target: &str, anchor: &str) -> Result<String, SnapError> {
    unsnap_with_options(target, anchor, &SnapOptions::default())
}

/// Find an instruction that takes `anchor` to `target`, preferring the
/// shortest one found. Identical instants give `""`.
///
/// Both timestamps are read in the zone context of `options` (the host's
/// zone by default), and a collapsed candidate is accepted when snapping
/// `anchor` with it formats exactly as `target` does in that context. A
/// target written with another offset, or with sub-millisecond digits, is
/// compared in its normalized form (`2023-09-25T00:00:00-04:00` is
/// `2023-09-24T23:00:00.000-05:00` in Chicago).
///
/// # Errors
///
/// Returns [`SnapError::Parse`] or [`SnapError::InvalidTimezone`] if either
/// timestamp or the zone cannot be parsed. A candidate that fails to apply
/// is discarded rather than reported.
pub fn unsnap_with_options(
    target: &str,
    anchor: &str,
    options: &SnapOptions,
) -> Result<String, SnapError> {
    let zone = options.zone.as_deref();
    let target = calendar::parse_timestamp(target, zone)?;
    let anchor = calendar::parse_timestamp(anchor, zone)?;

    let difference = calendar::diff_instants(&anchor, &target);
    let chain = render(&chain_tokens(&difference));
    let mut best = chain.clone();

    for unit in difference.units() {
        let candidate = match snap_descendants(&chain, unit) {
            Ok(candidate) => candidate,
            Err(_) => continue,
        };
        if candidate.len() <= best.len() && lands_on(&anchor, &candidate, &target) {
            best = candidate;
        } else {
            trace!(%unit, %candidate, "rejected collapse");
        }
    }

    debug!(%chain, %best, "unsnapped");
    Ok(best)
}

/// Whether `instruction` applied to `anchor` formats as `target`.
fn lands_on(anchor: &Instant, instruction: &str, target: &Instant) -> bool {
    parse(instruction)
        .and_then(|tokens| evaluate(anchor, &tokens))
        .is_ok_and(|result| result.format() == target.format())
}

/// One delta per non-zero field, coarsest first.
fn chain_tokens(difference: &CalendarDiff) -> Vec<Token> {
    difference
        .units()
        .map(|unit| {
            let amount = difference.get(unit);
            let sign = if amount < 0 { Sign::Minus } else { Sign::Plus };
            Delta::new(sign, amount.unsigned_abs(), unit).into()
        })
        .collect()
}

fn is_negative(token: &Token) -> bool {
    matches!(token, Token::Delta(Delta { sign: Sign::Minus, .. }))
}

/// Collapse the trailing run of negative deltas into a snap on `unit`.
///
/// The run is the longest suffix of `chain` made only of negative deltas.
/// Within it, deltas coarser than `unit` and the finest delta on `unit`
/// are kept, everything finer is dropped, and `@<unit>` is appended.
/// Tokens before the run are kept as they are.
///
/// The chain comes back unchanged when there is no negative run or the run
/// has no delta on `unit`: a snap only ever rounds back, so a positive tail
/// has nothing to collapse into.
///
/// # Errors
///
/// Returns [`SnapError::Parse`] or [`SnapError::Unit`] if `chain` is not a
/// valid instruction.
///
/// # Examples
///
/// ```
/// use snaptime::{snap_descendants, Unit};
///
/// assert_eq!(snap_descendants("-1d-23h-59m-59s-999ms", Unit::Days).unwrap(), "-1d@d");
/// assert_eq!(snap_descendants("+1y+11mon+3w+6d", Unit::Months).unwrap(), "+1y+11mon+3w+6d");
/// ```
pub fn snap_descendants(chain: &str, unit: Unit) -> Result<String, SnapError> {
    let tokens = parse(chain)?;
    let run_start = tokens
        .iter()
        .rposition(|token| !is_negative(token))
        .map_or(0, |i| i + 1);
    let (prefix, run) = tokens.split_at(run_start);

    let on_unit = run
        .iter()
        .rposition(|token| matches!(token, Token::Delta(delta) if delta.unit == unit));
    let Some(on_unit) = on_unit else {
        return Ok(chain.to_string());
    };

    let coarser = run[..on_unit]
        .iter()
        .filter(|token| matches!(token, Token::Delta(delta) if delta.unit > unit));

    let collapsed: Vec<Token> = prefix
        .iter()
        .chain(coarser)
        .copied()
        .chain([run[on_unit], Snap::new(unit).into()])
        .collect();
    Ok(render(&collapsed))
}
