//! CLI argument definitions for snaptime.
//!
//! Uses `clap` derive macros. Each subcommand has its own argument struct.
//! Instructions routinely start with `-` (`-7d@d`), so every instruction
//! positional accepts hyphen values.

use clap::{Parser, Subcommand};

/// Apply and reconstruct relative time instructions like `-7d@d`.
#[derive(Debug, Parser)]
#[command(name = "snaptime")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply an instruction to a timestamp and print the result.
    Snap(SnapArgs),

    /// Print the shortest instruction that takes ANCHOR to TARGET.
    Unsnap(UnsnapArgs),

    /// Tokenize an instruction without evaluating it.
    Parse(ParseArgs),
}

/// Arguments for the `snap` subcommand.
#[derive(Debug, clap::Args)]
pub struct SnapArgs {
    /// ISO 8601 timestamp, e.g. 2023-09-26T12:35:31.337-05:00.
    pub timestamp: String,

    /// Instruction such as "-7d@d" or "+1mon@w1". Empty returns TIMESTAMP as is.
    #[arg(allow_hyphen_values = true)]
    pub instruction: Option<String>,

    /// IANA zone or fixed offset to evaluate in.
    ///
    /// Without it the host's zone is used (`TZ`, then the system setting).
    #[arg(long, value_name = "ZONE", env = "SNAPTIME_ZONE")]
    pub zone: Option<String>,
}

/// Arguments for the `unsnap` subcommand.
#[derive(Debug, clap::Args)]
pub struct UnsnapArgs {
    /// Timestamp the instruction should land on.
    pub target: String,

    /// Timestamp the instruction is applied to.
    pub anchor: String,

    /// IANA zone or fixed offset to evaluate in.
    #[arg(long, value_name = "ZONE", env = "SNAPTIME_ZONE")]
    pub zone: Option<String>,
}

/// Arguments for the `parse` subcommand.
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// Instruction to tokenize.
    #[arg(allow_hyphen_values = true)]
    pub instruction: String,

    /// Print the tokens as a JSON array.
    #[arg(long)]
    pub json: bool,
}
