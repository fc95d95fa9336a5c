//! Spreadsheet workbook (`.xlsx`) with one sheet per report section.
//!
//! Amounts are written as numeric cells rounded to cents, so the sheets can
//! be summed and re-formatted in a spreadsheet tool.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use sfc_engine::analysis::AnalysisResults;

use crate::csv_export::summary_records;
use crate::error::{ExportError, ExportResult};
use crate::money::to_cents;
use crate::report::SECTIONS;

const MONEY_FORMAT: &str = "#,##0.00";
const COLUMN_WIDTH: f64 = 20.0;

/// Sheet names written for `results`, in workbook order.
///
/// The PV Analysis sheet is left out when the price was overridden.
#[must_use]
pub fn workbook_sheets(results: &AnalysisResults) -> Vec<&'static str> {
    SECTIONS
        .iter()
        .copied()
        .filter(|name| *name != SECTIONS[1] || results.pv_analysis.is_some())
        .collect()
}

/// Builds the workbook and returns the `.xlsx` bytes.
pub fn analysis_workbook(results: &AnalysisResults) -> ExportResult<Vec<u8>> {
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let mut workbook = Workbook::new();

    {
        let sheet = add_sheet(&mut workbook, SECTIONS[0], &header, &["Metric", "Value"])?;
        for (row, record) in (1u32..).zip(summary_records(results)?) {
            sheet.write_string(row, 0, record.metric)?;
            match record.value.parse::<f64>() {
                Ok(value) => sheet.write_number_with_format(row, 1, value, &money)?,
                Err(_) => sheet.write_string(row, 1, record.value.as_str())?,
            };
        }
    }

    if let Some(pv) = &results.pv_analysis {
        let sheet = add_sheet(
            &mut workbook,
            SECTIONS[1],
            &header,
            &[
                "Period",
                "Start",
                "End",
                "Service Midpoint",
                "Years Discounted",
                "Stated Amount",
                "Present Value",
                "Financing Component",
            ],
        )?;
        for (row, line) in (1u32..).zip(&pv.rows) {
            sheet.write_number(row, 0, line.period as f64)?;
            sheet.write_string(row, 1, line.start.to_string())?;
            sheet.write_string(row, 2, line.end.to_string())?;
            sheet.write_string(row, 3, line.service_midpoint.to_string())?;
            sheet.write_number(row, 4, line.years_from_payment)?;
            sheet.write_number_with_format(row, 5, amount(line.stated_amount)?, &money)?;
            sheet.write_number_with_format(row, 6, amount(line.present_value)?, &money)?;
            sheet.write_number_with_format(row, 7, amount(line.financing_component)?, &money)?;
        }
    }

    {
        let sheet = add_sheet(
            &mut workbook,
            SECTIONS[2],
            &header,
            &[
                "Period",
                "Date",
                "Opening Liability",
                "Interest Income",
                "Revenue Recognized",
                "Ending Liability",
            ],
        )?;
        for (row, line) in (1u32..).zip(results.amortization_schedule.rows()) {
            sheet.write_string(row, 0, line.period.to_string())?;
            sheet.write_string(row, 1, line.date.to_string())?;
            sheet.write_number_with_format(row, 2, amount(line.opening_liability)?, &money)?;
            sheet.write_number_with_format(row, 3, amount(line.interest_income)?, &money)?;
            sheet.write_number_with_format(row, 4, amount(line.revenue_recognized)?, &money)?;
            sheet.write_number_with_format(row, 5, amount(line.ending_liability)?, &money)?;
        }
    }

    {
        let sheet = add_sheet(
            &mut workbook,
            SECTIONS[3],
            &header,
            &["Entry #", "Date", "Description", "Account", "Debit", "Credit"],
        )?;
        let mut row = 1u32;
        for entry in &results.journal_entries {
            let postings = entry
                .debits
                .iter()
                .map(|line| (line, 4u16))
                .chain(entry.credits.iter().map(|line| (line, 5u16)));
            for (line, column) in postings {
                sheet.write_number(row, 0, entry.entry_num as f64)?;
                sheet.write_string(row, 1, entry.date.to_string())?;
                sheet.write_string(row, 2, entry.description.as_str())?;
                sheet.write_string(row, 3, line.account.name())?;
                sheet.write_number_with_format(row, column, amount(line.amount)?, &money)?;
                row += 1;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn add_sheet<'a>(
    workbook: &'a mut Workbook,
    name: &str,
    header: &Format,
    columns: &[&str],
) -> ExportResult<&'a mut Worksheet> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    for (col, title) in (0u16..).zip(columns) {
        sheet.write_string_with_format(0, col, *title, header)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    Ok(sheet)
}

/// Cents-rounded cell value.
fn amount(value: f64) -> ExportResult<f64> {
    to_cents(value)?
        .to_f64()
        .ok_or(ExportError::InvalidAmount { value })
}
