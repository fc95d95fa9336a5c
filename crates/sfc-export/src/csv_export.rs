//! Flat CSV tables.
//!
//! The journal layout (`Date, Account, Debit, Credit, Memo`, dates as
//! `MM/DD/YYYY`, one line per posting) is what ERP journal imports accept.

use serde::Serialize;
use std::io::Write;

use sfc_engine::amortization::AmortizationSchedule;
use sfc_engine::analysis::AnalysisResults;
use sfc_engine::journal::JournalEntry;
use sfc_engine::present_value::PresentValueAnalysis;

use crate::error::ExportResult;
use crate::money::{cents, percent};

#[derive(Debug, Serialize)]
struct JournalRecord<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Account")]
    account: &'static str,
    #[serde(rename = "Debit")]
    debit: Option<String>,
    #[serde(rename = "Credit")]
    credit: Option<String>,
    #[serde(rename = "Memo")]
    memo: &'a str,
}

#[derive(Debug, Serialize)]
struct ScheduleRecord {
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Opening Liability")]
    opening: String,
    #[serde(rename = "Interest Income")]
    interest: String,
    #[serde(rename = "Revenue Recognized")]
    revenue: String,
    #[serde(rename = "Ending Liability")]
    ending: String,
}

#[derive(Debug, Serialize)]
struct PvRecord {
    #[serde(rename = "Period")]
    period: usize,
    #[serde(rename = "Start")]
    start: String,
    #[serde(rename = "End")]
    end: String,
    #[serde(rename = "Service Midpoint")]
    midpoint: String,
    #[serde(rename = "Years Discounted")]
    years: String,
    #[serde(rename = "Stated Amount")]
    stated: String,
    #[serde(rename = "Present Value")]
    present_value: String,
    #[serde(rename = "Financing Component")]
    financing: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MetricRecord {
    #[serde(rename = "Metric")]
    pub(crate) metric: &'static str,
    #[serde(rename = "Value")]
    pub(crate) value: String,
}

impl MetricRecord {
    fn new(metric: &'static str, value: impl Into<String>) -> Self {
        Self {
            metric,
            value: value.into(),
        }
    }
}

/// Writes journal entries for ERP import.
pub fn write_journal_csv<W: Write>(writer: W, entries: &[JournalEntry]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in entries {
        let date = entry.date.to_us_string();
        for line in &entry.debits {
            wtr.serialize(JournalRecord {
                date: date.clone(),
                account: line.account.name(),
                debit: Some(cents(line.amount)?),
                credit: None,
                memo: &entry.description,
            })?;
        }
        for line in &entry.credits {
            wtr.serialize(JournalRecord {
                date: date.clone(),
                account: line.account.name(),
                debit: None,
                credit: Some(cents(line.amount)?),
                memo: &entry.description,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the amortization schedule.
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &AmortizationSchedule) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in schedule_records(schedule)? {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the per-period present value table.
pub fn write_pv_csv<W: Write>(writer: W, pv: &PresentValueAnalysis) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in pv_records(pv)? {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the headline metrics as `Metric, Value` pairs.
pub fn write_summary_csv<W: Write>(writer: W, results: &AnalysisResults) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in summary_records(results)? {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders the journal CSV to a string.
pub fn journal_csv(entries: &[JournalEntry]) -> ExportResult<String> {
    render(|buf| write_journal_csv(buf, entries))
}

/// Renders the schedule CSV to a string.
pub fn schedule_csv(schedule: &AmortizationSchedule) -> ExportResult<String> {
    render(|buf| write_schedule_csv(buf, schedule))
}

/// Renders the present value CSV to a string.
pub fn pv_csv(pv: &PresentValueAnalysis) -> ExportResult<String> {
    render(|buf| write_pv_csv(buf, pv))
}

/// Renders the summary CSV to a string.
pub fn summary_csv(results: &AnalysisResults) -> ExportResult<String> {
    render(|buf| write_summary_csv(buf, results))
}

fn render(write: impl FnOnce(&mut Vec<u8>) -> ExportResult<()>) -> ExportResult<String> {
    let mut buf = Vec::new();
    write(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn schedule_records(schedule: &AmortizationSchedule) -> ExportResult<Vec<ScheduleRecord>> {
    schedule
        .rows()
        .iter()
        .map(|row| {
            Ok(ScheduleRecord {
                period: row.period.to_string(),
                date: row.date.to_string(),
                opening: cents(row.opening_liability)?,
                interest: cents(row.interest_income)?,
                revenue: cents(row.revenue_recognized)?,
                ending: cents(row.ending_liability)?,
            })
        })
        .collect()
}

fn pv_records(pv: &PresentValueAnalysis) -> ExportResult<Vec<PvRecord>> {
    pv.rows
        .iter()
        .map(|row| {
            Ok(PvRecord {
                period: row.period,
                start: row.start.to_string(),
                end: row.end.to_string(),
                midpoint: row.service_midpoint.to_string(),
                years: format!("{:.4}", row.years_from_payment),
                stated: cents(row.stated_amount)?,
                present_value: cents(row.present_value)?,
                financing: cents(row.financing_component)?,
            })
        })
        .collect()
}

pub(crate) fn summary_records(results: &AnalysisResults) -> ExportResult<Vec<MetricRecord>> {
    let s = &results.summary;
    let alloc = &results.allocation;
    let fc = s.financing_component;
    let rec = &results.reconciliation;

    Ok(vec![
        MetricRecord::new("Customer", s.customer.clone()),
        MetricRecord::new("Cash Received", cents(s.cash_received)?),
        MetricRecord::new("Stated Contract Value", cents(s.total_stated)?),
        MetricRecord::new("Transaction Price (PV)", cents(s.transaction_price)?),
        MetricRecord::new("Price Source", results.transaction_price.source.to_string()),
        MetricRecord::new("Financing Component", cents(fc)?),
        MetricRecord::new("Financing %", percent(s.financing_pct, 2)),
        MetricRecord::new("License Allocation %", percent(s.license_pct, 0)),
        MetricRecord::new("License Revenue", cents(alloc.license_revenue)?),
        MetricRecord::new("License Financing", cents(fc * alloc.license_pct)?),
        MetricRecord::new("Support Allocation %", percent(s.support_pct, 0)),
        MetricRecord::new("Support Revenue", cents(alloc.support_total)?),
        MetricRecord::new("Support Financing", cents(fc * alloc.support_pct)?),
        MetricRecord::new("Annual Support", cents(alloc.annual_support)?),
        MetricRecord::new("Discount Rate", percent(s.discount_rate * 100.0, 1)),
        MetricRecord::new("Is Significant?", if s.is_significant { "YES" } else { "NO" }),
        MetricRecord::new("Total Revenue", cents(rec.total_revenue)?),
        MetricRecord::new("Total Interest", cents(rec.total_interest)?),
        MetricRecord::new("Reconciliation Difference", cents(rec.difference)?),
        MetricRecord::new("Residual Liability", cents(rec.residual_liability)?),
    ])
}
