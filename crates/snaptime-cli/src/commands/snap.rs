//! Handler for the `snap` subcommand.

use anyhow::{Context, Result};

use crate::cli::SnapArgs;

/// Apply the instruction and print the resulting timestamp.
pub fn execute(args: &SnapArgs) -> Result<()> {
    let instruction = args.instruction.as_deref().unwrap_or_default();
    let options = super::options_for(args.zone.as_deref());

    let result = snaptime::snap_with_options(&args.timestamp, instruction, &options)
        .with_context(|| format!("cannot apply '{instruction}' to '{}'", args.timestamp))?;

    println!("{result}");
    Ok(())
}
