//! Sectioned workbook-style report.
//!
//! All tables of an analysis in one CSV document. Each section starts with a
//! single-cell title line and ends with a blank line:
//!
//! ```text
//! Summary
//! Metric,Value
//! ...
//!
//! PV Analysis
//! ...
//! ```

use std::io::Write;

use sfc_engine::analysis::AnalysisResults;

use crate::csv_export::{summary_records, write_pv_csv, write_schedule_csv};
use crate::error::ExportResult;
use crate::money::cents;

/// Section titles in the order they are written.
pub const SECTIONS: [&str; 4] = [
    "Summary",
    "PV Analysis",
    "Amortization Schedule",
    "Journal Entries",
];

/// Writes the full report. The PV section is omitted for override runs.
pub fn write_report<W: Write>(mut writer: W, results: &AnalysisResults) -> ExportResult<()> {
    section(&mut writer, SECTIONS[0], |w| {
        let mut wtr = csv::Writer::from_writer(w);
        for record in summary_records(results)? {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    })?;

    if let Some(pv) = &results.pv_analysis {
        section(&mut writer, SECTIONS[1], |w| write_pv_csv(w, pv))?;
    }

    section(&mut writer, SECTIONS[2], |w| {
        write_schedule_csv(w, &results.amortization_schedule)
    })?;

    section(&mut writer, SECTIONS[3], |w| write_journal_block(w, results))?;

    writer.flush()?;
    Ok(())
}

/// Renders the report to a string.
pub fn analysis_report(results: &AnalysisResults) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, results)?;
    Ok(String::from_utf8(buf)?)
}

fn section<W: Write>(
    writer: &mut W,
    title: &str,
    body: impl FnOnce(&mut W) -> ExportResult<()>,
) -> ExportResult<()> {
    writeln!(writer, "{title}")?;
    body(writer)?;
    writeln!(writer)?;
    Ok(())
}

/// Entry header line followed by one line per posting, entries separated by
/// a blank record.
fn write_journal_block<W: Write>(writer: &mut W, results: &AnalysisResults) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Entry #", "Date", "Description", "Account", "Debit", "Credit"])?;

    for entry in &results.journal_entries {
        wtr.write_record([
            entry.entry_num.to_string().as_str(),
            entry.date.to_string().as_str(),
            entry.description.as_str(),
            "",
            "",
            "",
        ])?;
        for line in &entry.debits {
            let amount = cents(line.amount)?;
            wtr.write_record(["", "", "", line.account.name(), amount.as_str(), ""])?;
        }
        for line in &entry.credits {
            let amount = cents(line.amount)?;
            wtr.write_record(["", "", "", line.account.name(), "", amount.as_str()])?;
        }
        wtr.write_record(["", "", "", "", "", ""])?;
    }
    wtr.flush()?;
    Ok(())
}
