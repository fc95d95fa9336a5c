//! Rounding of engine amounts for presentation.
//!
//! The engine works in `f64`; exports round half away from zero to cents
//! through `Decimal` so that the written figures never show binary noise.

use rust_decimal::prelude::*;

use crate::error::{ExportError, ExportResult};

/// Rounds an amount to cents.
///
/// # Errors
///
/// Returns `ExportError::InvalidAmount` for NaN, infinities and values
/// outside the `Decimal` range.
pub fn to_cents(value: f64) -> ExportResult<Decimal> {
    round_to(value, 2)
}

fn round_to(value: f64, decimals: u32) -> ExportResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(ExportError::InvalidAmount { value })
}

/// Formats an amount with exactly two decimals (`1234.50`).
pub fn cents(value: f64) -> ExportResult<String> {
    Ok(format!("{:.2}", to_cents(value)?))
}

/// Formats an amount as currency with thousands separators (`$1,234.50`).
pub fn currency(value: f64) -> ExportResult<String> {
    format_currency(value, 2)
}

/// Formats an amount as currency rounded to `decimals` places
/// (`format_currency(1234.5, 0)` is `$1,235`).
///
/// Amounts that round to zero never carry a minus sign.
pub fn format_currency(value: f64, decimals: u32) -> ExportResult<String> {
    let rounded = round_to(value, decimals)?;
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let precision = decimals as usize;
    let plain = format!("{:.precision$}", rounded.abs());
    let (whole, frac) = match plain.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    Ok(match frac {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    })
}

/// Formats a value already expressed in percent (`15.75%`).
#[must_use]
pub fn percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}
