//! Analyze command implementation.
//!
//! Runs the full analysis for a contract file and prints the summary,
//! amortization schedule and reconciliation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sfc_engine::{analyze_with_config, AnalysisConfig, AnalysisResults};
use sfc_export::money::{currency, percent};
use sfc_export::{file_stem, journal_csv, write_exports};

use crate::cli::OutputFormat;
use crate::commands::{load_config, load_contract};
use crate::output::{
    print_header, print_json, print_reconciliation, print_success, print_table, schedule_lines,
    KeyValue,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Contract JSON file
    pub contract: PathBuf,

    /// Annual discount rate as a fraction (e.g., 0.06 for 6%)
    #[arg(short, long)]
    pub discount_rate: Option<f64>,

    /// License share of the transaction price as a fraction
    #[arg(short, long)]
    pub license_pct: Option<f64>,

    /// Use this present value instead of discounting the periods
    #[arg(long)]
    pub override_pv: Option<f64>,

    /// Discount by actual days to each period end (ACT/365.25)
    #[arg(long)]
    pub exact_days: bool,

    /// TOML file with analysis defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write CSV exports into this directory
    #[arg(short, long)]
    pub export_dir: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Layers the command-line flags over the configuration file.
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(rate) = self.discount_rate {
            config.discount_rate = rate;
        }
        if let Some(pct) = self.license_pct {
            config.license_pct = pct;
        }
        if self.override_pv.is_some() {
            config.override_pv = self.override_pv;
        }
        if self.exact_days {
            config.use_integer_years = false;
        }
        Ok(config)
    }
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let contract = load_contract(&args.contract)?;
    let config = args.analysis_config()?;
    let results = analyze_with_config(&contract, &config)?;

    match format {
        OutputFormat::Table => print_report(&results)?,
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Csv => print!("{}", journal_csv(&results.journal_entries)?),
        OutputFormat::Minimal => {
            let s = &results.summary;
            println!(
                "{}: financing {} ({}) on price {}",
                s.customer,
                currency(s.financing_component)?,
                percent(s.financing_pct, 2),
                currency(s.transaction_price)?
            );
        }
    }

    if let Some(dir) = &args.export_dir {
        let paths = write_exports(&results, dir, &file_stem(&results.summary.customer))?;
        if format == OutputFormat::Table && !quiet {
            for path in paths {
                print_success(&format!("Exported {}", path.display()));
            }
        }
    }

    Ok(())
}

fn print_report(results: &AnalysisResults) -> Result<()> {
    let s = &results.summary;

    print_header(&format!("ASC 606 Analysis - {}", s.customer.to_uppercase()));
    let summary = [
        KeyValue::new("Cash Received", currency(s.cash_received)?),
        KeyValue::new("Stated Contract Value", currency(s.total_stated)?),
        KeyValue::new("Transaction Price (PV)", currency(s.transaction_price)?),
        KeyValue::new(
            "Financing Component",
            format!(
                "{} ({})",
                currency(s.financing_component)?,
                percent(s.financing_pct, 2)
            ),
        ),
        KeyValue::new("Significant", if s.is_significant { "Yes" } else { "No" }),
        KeyValue::new("Discount Rate", percent(s.discount_rate * 100.0, 1)),
        KeyValue::new("License Allocation", percent(s.license_pct, 0)),
        KeyValue::new("Support Allocation", percent(s.support_pct, 0)),
    ];
    print_table(&summary);

    print_header("Amortization Schedule");
    print_table(&schedule_lines(&results.amortization_schedule)?);

    print_header("Reconciliation");
    print_reconciliation(&results.reconciliation)?;

    Ok(())
}
