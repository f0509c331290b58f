//! Command handlers for each CLI subcommand.
//!
//! Each subcommand lives in its own module and exposes a single `execute`
//! function that receives the parsed arguments.

pub mod parse;
pub mod snap;
pub mod unsnap;

use snaptime::SnapOptions;

/// Build library options from a `--zone` value.
fn options_for(zone: Option<&str>) -> SnapOptions {
    zone.map(SnapOptions::with_zone).unwrap_or_default()
}
