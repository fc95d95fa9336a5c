//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use sfc_engine::amortization::{AmortizationSchedule, Reconciliation};
use sfc_export::money::format_currency;
use sfc_export::ExportResult;

/// Whole currency units (`$1,234,568`).
fn whole_currency(value: f64) -> ExportResult<String> {
    format_currency(value, 0)
}

/// Prints rows as a rounded table with right-aligned figures.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    println!("{table}");
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One displayed schedule line.
#[derive(Debug, Clone, Tabled)]
pub struct ScheduleLine {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Opening")]
    pub opening: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[tabled(rename = "Ending")]
    pub ending: String,
}

/// Schedule rows followed by a TOTALS line.
pub fn schedule_lines(schedule: &AmortizationSchedule) -> ExportResult<Vec<ScheduleLine>> {
    let mut lines = schedule
        .rows()
        .iter()
        .map(|row| {
            Ok(ScheduleLine {
                period: row.period.to_string(),
                date: row.date.to_string(),
                opening: whole_currency(row.opening_liability)?,
                interest: whole_currency(row.interest_income)?,
                revenue: whole_currency(row.revenue_recognized)?,
                ending: whole_currency(row.ending_liability)?,
            })
        })
        .collect::<ExportResult<Vec<_>>>()?;

    lines.push(ScheduleLine {
        period: "TOTALS".to_string(),
        date: String::new(),
        opening: String::new(),
        interest: whole_currency(schedule.total_interest())?,
        revenue: whole_currency(schedule.total_revenue())?,
        ending: String::new(),
    });
    Ok(lines)
}

/// Prints the reconciliation block and its verdict.
pub fn print_reconciliation(rec: &Reconciliation) -> ExportResult<()> {
    let rows = [
        KeyValue::new("Cash Received", whole_currency(rec.cash_received)?),
        KeyValue::new("Total Revenue", whole_currency(rec.total_revenue)?),
        KeyValue::new("Total Interest", whole_currency(rec.total_interest)?),
        KeyValue::new(
            "Sum",
            whole_currency(rec.total_revenue + rec.total_interest)?,
        ),
        KeyValue::new("Residual Liability", whole_currency(rec.residual_liability)?),
    ];
    print_table(&rows);

    if rec.is_reconciled {
        print_success("Schedule reconciles to cash received");
    } else {
        print_warning(&format!(
            "Difference: {}",
            whole_currency(rec.difference.abs())?
        ));
    }
    Ok(())
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
