//! # snaptime
//!
//! A compact mini-language for relative time.
//!
//! An instruction is a chain of deltas (`-7d`, `+2h`) and snaps (`@d`,
//! `@mon`, `@w1`) applied left to right to a timestamp: `"-7d@d"` is the
//! start of the day seven days ago. [`unsnap()`] goes the other way and finds
//! a short instruction that takes one timestamp to another.
//!
//! ## Modules
//!
//! - [`unit`] — the eight canonical units and their aliases
//! - [`parser`] — instruction string → ordered [`Token`]s
//! - [`transform`] — [`Delta`] offsets and [`Snap`] alignments
//! - [`eval`] — [`snap()`]: parse and apply an instruction
//! - [`mod@unsnap`] — reconstruct an instruction from two timestamps
//! - [`calendar`] — ISO 8601 parsing/formatting and calendar arithmetic on `chrono`
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod eval;
pub mod parser;
pub mod transform;
pub mod unit;
pub mod unsnap;

pub use calendar::{CalendarDiff, Instant};
pub use error::SnapError;
pub use eval::{snap, snap_with_options, SnapOptions};
pub use parser::parse;
pub use transform::{Delta, Sign, Snap, Token};
pub use unit::{get_unit, Unit};
pub use unsnap::{snap_descendants, unsnap, unsnap_with_options};
