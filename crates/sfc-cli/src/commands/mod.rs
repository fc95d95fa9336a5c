//! CLI command implementations.

pub mod analyze;
pub mod sample;

pub use analyze::AnalyzeArgs;
pub use sample::SampleArgs;

use std::fs;
use std::path::Path;

use sfc_core::types::{Contract, ContractInput};
use sfc_engine::AnalysisConfig;

use crate::error::{CliError, CliResult};

/// Reads and validates a contract JSON file.
pub fn load_contract(path: &Path) -> CliResult<Contract> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let input: ContractInput =
        serde_json::from_str(&content).map_err(|e| CliError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let contract = input.into_contract()?;
    tracing::debug!(
        path = %path.display(),
        customer = contract.customer(),
        periods = contract.period_count(),
        "contract loaded"
    );
    Ok(contract)
}

/// Reads analysis defaults from a TOML file.
pub fn load_config(path: &Path) -> CliResult<AnalysisConfig> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}
