//! Transaction price and its split between license and support.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use sfc_core::{SfcError, SfcResult};

use crate::config::validate_split;
use crate::present_value::PresentValueAnalysis;

/// Where the transaction price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Sum of the discounted period amounts.
    Discounted,
    /// A manually verified present value.
    Override,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::Discounted => write!(f, "Discounted"),
            PriceSource::Override => write!(f, "Override"),
        }
    }
}

/// The transaction price (total present value) and the implied financing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransactionPrice {
    /// Present value of the contract.
    pub total_pv: f64,
    /// Nominal amount minus present value.
    pub financing_component: f64,
    /// Financing component as a percentage of the nominal base.
    pub financing_pct: f64,
    /// Discounted or overridden.
    pub source: PriceSource,
}

impl TransactionPrice {
    /// Takes the price from a discounting run.
    #[must_use]
    pub fn from_present_value(pv: &PresentValueAnalysis) -> Self {
        Self {
            total_pv: pv.total_pv,
            financing_component: pv.financing_component,
            financing_pct: pv.financing_pct,
            source: PriceSource::Discounted,
        }
    }

    /// Takes the price from an override; financing is measured against cash.
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidAmount` if `override_pv` is not positive.
    pub fn from_override(cash_received: f64, override_pv: f64) -> SfcResult<Self> {
        if !(override_pv.is_finite() && override_pv > 0.0) {
            return Err(SfcError::invalid_amount("override_pv", override_pv));
        }
        let financing_component = cash_received - override_pv;
        Ok(Self {
            total_pv: override_pv,
            financing_component,
            financing_pct: financing_component / cash_received * 100.0,
            source: PriceSource::Override,
        })
    }
}

/// License / support split of the transaction price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Allocation {
    /// Transaction price being allocated.
    pub total_pv: f64,
    /// Recognized at the point the license is delivered.
    pub license_revenue: f64,
    /// Recognized evenly over the service periods.
    pub support_total: f64,
    /// `support_total / period_count`.
    pub annual_support: f64,
    /// License share as a fraction.
    pub license_pct: f64,
    /// Support share as a fraction.
    pub support_pct: f64,
}

/// Splits `total_pv` into license and support and spreads support evenly.
///
/// # Errors
///
/// - `SfcError::InvalidAllocation` if the shares are out of range or do not
///   sum to one
/// - `SfcError::EmptySchedule` if `period_count` is zero
pub fn allocate(
    total_pv: f64,
    license_pct: f64,
    support_pct: f64,
    period_count: usize,
) -> SfcResult<Allocation> {
    validate_split(license_pct, support_pct)?;
    if period_count == 0 {
        return Err(SfcError::EmptySchedule);
    }

    let license_revenue = total_pv * license_pct;
    let support_total = total_pv * support_pct;
    let annual_support = support_total / period_count as f64;

    debug!(
        total_pv,
        license_revenue,
        support_total,
        annual_support,
        "transaction price allocated"
    );

    Ok(Allocation {
        total_pv,
        license_revenue,
        support_total,
        annual_support,
        license_pct,
        support_pct,
    })
}
