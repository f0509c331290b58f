//! snaptime: apply and reconstruct relative time instructions.
//!
//! Entry point for the binary. Sets up logging, parses CLI arguments and
//! delegates to the matching command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse CLI arguments and dispatch to the command handler.
fn run() -> Result<()> {
    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "dispatching");

    match &cli.command {
        Commands::Snap(args) => commands::snap::execute(args),
        Commands::Unsnap(args) => commands::unsnap::execute(args),
        Commands::Parse(args) => commands::parse::execute(args),
    }
}
