//! Error types for export operations.

use thiserror::Error;

/// A specialized Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while rendering or writing exports.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the spreadsheet workbook failed.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Rendered CSV was not valid UTF-8.
    #[error("Invalid UTF-8 in rendered output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// An amount could not be represented as a decimal.
    #[error("Amount {value} cannot be rounded to cents")]
    InvalidAmount {
        /// The rejected amount.
        value: f64,
    },
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        ExportError::Io(err.into_error())
    }
}
