//! SFC CLI - Command-line interface for significant financing component analysis.
//!
//! # Usage
//!
//! ```bash
//! # Start from the sample contract
//! sfc sample --output contract.json
//!
//! # Analyze with defaults (6% rate, 20% license)
//! sfc analyze contract.json
//!
//! # Custom parameters and CSV exports
//! sfc analyze contract.json --discount-rate 0.05 --license-pct 0.25 --export-dir out/
//!
//! # Journal entries CSV on stdout
//! sfc --format csv analyze contract.json > journal.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format, cli.quiet)?,
        Commands::Sample(args) => commands::sample::execute(args, cli.quiet)?,
    }

    Ok(())
}
