//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use sfc_core::SfcError;
use sfc_export::ExportError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A contract file is not valid JSON.
    #[error("Invalid contract JSON in {path}: {message}")]
    InvalidJson {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine rejected the input.
    #[error(transparent)]
    Analysis(#[from] SfcError),

    /// Writing exports failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
