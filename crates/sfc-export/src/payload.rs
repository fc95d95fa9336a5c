//! Rendered export bundles and their on-disk / base64 forms.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use sfc_engine::analysis::AnalysisResults;

use crate::csv_export::{journal_csv, pv_csv, schedule_csv, summary_csv};
use crate::error::ExportResult;
use crate::report::analysis_report;
use crate::workbook::{analysis_workbook, workbook_sheets};

/// Encodes bytes as standard base64.
#[must_use]
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// The two documents returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisExports {
    /// `.xlsx` workbook with one sheet per report section.
    pub workbook: Vec<u8>,
    /// Journal entries for ERP import.
    pub journal_csv: String,
}

impl AnalysisExports {
    /// Renders both documents.
    pub fn render(results: &AnalysisResults) -> ExportResult<Self> {
        Ok(Self {
            workbook: analysis_workbook(results)?,
            journal_csv: journal_csv(&results.journal_entries)?,
        })
    }

    /// Base64 of the workbook.
    #[must_use]
    pub fn workbook_base64(&self) -> String {
        encode_base64(&self.workbook)
    }

    /// Base64 of the journal CSV.
    #[must_use]
    pub fn journal_base64(&self) -> String {
        encode_base64(&self.journal_csv)
    }
}

/// Writes every export for `results` into `dir`, naming files after `stem`.
///
/// Produces `{stem}_report.csv`, `{stem}_journal_entries.csv`,
/// `{stem}_schedule.csv`, `{stem}_summary.csv`, unless the price was
/// overridden `{stem}_pv_analysis.csv`, and finally the `{stem}_analysis.xlsx`
/// workbook. The directory is created if needed.
///
/// Returns the written paths in that order.
pub fn write_exports(
    results: &AnalysisResults,
    dir: impl AsRef<Path>,
    stem: &str,
) -> ExportResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut documents = vec![
        ("report", analysis_report(results)?),
        ("journal_entries", journal_csv(&results.journal_entries)?),
        ("schedule", schedule_csv(&results.amortization_schedule)?),
        ("summary", summary_csv(results)?),
    ];
    if let Some(pv) = &results.pv_analysis {
        documents.push(("pv_analysis", pv_csv(pv)?));
    }

    let mut written = Vec::with_capacity(documents.len());
    for (suffix, content) in documents {
        let path = dir.join(format!("{stem}_{suffix}.csv"));
        fs::write(&path, content)?;
        info!(path = %path.display(), "export written");
        written.push(path);
    }

    let path = dir.join(format!("{stem}_analysis.xlsx"));
    fs::write(&path, analysis_workbook(results)?)?;
    info!(path = %path.display(), sheets = ?workbook_sheets(results), "workbook written");
    written.push(path);

    Ok(written)
}

/// Turns a customer name into a file stem (`Deka Bank` -> `deka_bank`).
#[must_use]
pub fn file_stem(customer: &str) -> String {
    let stem: String = customer
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "analysis".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64("Date,Account"), "RGF0ZSxBY2NvdW50");
        assert_eq!(encode_base64(""), "");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Deka Bank"), "deka_bank");
        assert_eq!(file_stem("  A&B GmbH "), "a_b_gmbh");
        assert_eq!(file_stem(""), "analysis");
    }
}
