//! # SFC Export
//!
//! Tabular exports of an analysis:
//! - Journal entries CSV for ERP import
//! - Amortization schedule, present value and summary CSVs
//! - A sectioned report holding every table, as CSV and as an `.xlsx` workbook
//! - Base64 payloads for HTTP responses
//!
//! Amounts are rounded to cents here and nowhere else.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod csv_export;
pub mod error;
pub mod money;
pub mod payload;
pub mod report;
pub mod workbook;

pub use csv_export::{
    journal_csv, pv_csv, schedule_csv, summary_csv, write_journal_csv, write_pv_csv,
    write_schedule_csv, write_summary_csv,
};
pub use error::{ExportError, ExportResult};
pub use payload::{encode_base64, file_stem, write_exports, AnalysisExports};
pub use report::{analysis_report, write_report};
pub use workbook::{analysis_workbook, workbook_sheets};
