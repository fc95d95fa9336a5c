//! Present value of the stated service amounts.
//!
//! Each period's stated amount is discounted back to the payment date with
//! annual compounding:
//!
//! ```text
//! PV_i = Stated_i / (1 + r)^t_i
//! FC_i = Stated_i - PV_i
//! ```
//!
//! where `t_i` comes from the configured [`DiscountConvention`].

use serde::Serialize;
use tracing::debug;

use sfc_core::types::{Contract, Date, DiscountConvention};
use sfc_core::{SfcError, SfcResult};

use crate::config::validate_rate;

/// Discount factor for annual compounding, `1 / (1 + rate)^years`.
#[must_use]
pub fn discount_factor(rate: f64, years: f64) -> f64 {
    1.0 / (1.0 + rate).powf(years)
}

/// Discounting detail for one service period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PvAnalysisRow {
    /// 1-based period number.
    pub period: usize,
    /// First day of service.
    pub start: Date,
    /// Last day of service.
    pub end: Date,
    /// Midpoint of the service period (reference only).
    pub service_midpoint: Date,
    /// Discount horizon in years.
    pub years_from_payment: f64,
    /// Stated (nominal) amount.
    pub stated_amount: f64,
    /// Amount discounted to the payment date.
    pub present_value: f64,
    /// `stated_amount - present_value`.
    pub financing_component: f64,
}

/// Per-period discounting plus contract totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentValueAnalysis {
    /// One row per service period, in contract order.
    pub rows: Vec<PvAnalysisRow>,
    /// Sum of stated amounts.
    pub total_stated: f64,
    /// Sum of present values.
    pub total_pv: f64,
    /// Sum of per-period financing components.
    pub financing_component: f64,
    /// `financing_component / total_stated * 100`.
    pub financing_pct: f64,
    /// Annual discount rate used.
    pub discount_rate: f64,
    /// Horizon convention used.
    pub convention: DiscountConvention,
}

impl PresentValueAnalysis {
    /// Returns the number of periods discounted.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.rows.len()
    }
}

/// Discounts every service period of `contract` to its payment date.
///
/// # Errors
///
/// Returns `SfcError::EmptySchedule` when the contract has no periods and
/// `SfcError::DegenerateRate` when `1 + rate <= 0`.
pub fn calculate_present_value(
    contract: &Contract,
    rate: f64,
    convention: DiscountConvention,
) -> SfcResult<PresentValueAnalysis> {
    if contract.periods().is_empty() {
        return Err(SfcError::EmptySchedule);
    }
    validate_rate(rate)?;

    let payment_date = contract.payment_date();
    let rows: Vec<PvAnalysisRow> = contract
        .periods()
        .iter()
        .enumerate()
        .map(|(i, period)| {
            let ordinal = i + 1;
            let years = convention.horizon_years(ordinal, payment_date, period.end());
            let stated = period.stated_amount();
            let pv = stated * discount_factor(rate, years);

            PvAnalysisRow {
                period: ordinal,
                start: period.start(),
                end: period.end(),
                service_midpoint: period.midpoint(),
                years_from_payment: years,
                stated_amount: stated,
                present_value: pv,
                financing_component: stated - pv,
            }
        })
        .collect();

    let total_stated: f64 = rows.iter().map(|r| r.stated_amount).sum();
    let total_pv: f64 = rows.iter().map(|r| r.present_value).sum();
    let financing_component: f64 = rows.iter().map(|r| r.financing_component).sum();
    let financing_pct = financing_component / total_stated * 100.0;

    debug!(
        periods = rows.len(),
        total_stated,
        total_pv,
        financing_component,
        %convention,
        "present value calculated"
    );

    Ok(PresentValueAnalysis {
        rows,
        total_stated,
        total_pv,
        financing_component,
        financing_pct,
        discount_rate: rate,
        convention,
    })
}
