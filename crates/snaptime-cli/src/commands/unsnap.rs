//! Handler for the `unsnap` subcommand.

use anyhow::{Context, Result};

use crate::cli::UnsnapArgs;

/// Reconstruct an instruction from anchor to target and print it.
pub fn execute(args: &UnsnapArgs) -> Result<()> {
    let options = super::options_for(args.zone.as_deref());

    let instruction = snaptime::unsnap_with_options(&args.target, &args.anchor, &options)
        .with_context(|| format!("cannot unsnap '{}' from '{}'", args.target, args.anchor))?;

    println!("{instruction}");
    Ok(())
}
