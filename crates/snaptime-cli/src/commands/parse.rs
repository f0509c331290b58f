//! Handler for the `parse` subcommand.
//!
//! Prints one canonical token per line, or the token list as JSON with
//! `--json`.

use anyhow::{Context, Result};

use crate::cli::ParseArgs;

/// Tokenize the instruction and print the tokens.
pub fn execute(args: &ParseArgs) -> Result<()> {
    let tokens = snaptime::parse(&args.instruction)
        .with_context(|| format!("cannot parse '{}'", args.instruction))?;

    if args.json {
        let json = serde_json::to_string_pretty(&tokens).context("failed to serialize tokens")?;
        println!("{json}");
    } else {
        for token in &tokens {
            println!("{token}");
        }
    }
    Ok(())
}
