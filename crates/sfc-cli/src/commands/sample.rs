//! Sample command implementation.
//!
//! Prints (or writes) a five-year contract to start from.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sfc_core::types::{ContractInput, PeriodInput};

use crate::output::print_success;

/// Arguments for the sample command.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Write the sample to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A five-year contract: 2,100,000 paid up front, 420,000 stated per year.
pub fn sample_contract() -> ContractInput {
    ContractInput {
        customer: Some("Deka Bank".to_string()),
        cash_received: Some(2_100_000.0),
        payment_date: Some("2025-12-31".to_string()),
        periods: Some(
            (0..5)
                .map(|i| PeriodInput {
                    start: Some(format!("{}-12-31", 2025 + i)),
                    end: Some(format!("{}-12-30", 2026 + i)),
                    stated_amount: Some(420_000.0),
                })
                .collect(),
        ),
    }
}

/// Execute the sample command.
pub fn execute(args: SampleArgs, quiet: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(&sample_contract())?;
    match args.output {
        Some(path) => {
            fs::write(&path, format!("{json}\n"))?;
            if !quiet {
                print_success(&format!("Wrote {}", path.display()));
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
