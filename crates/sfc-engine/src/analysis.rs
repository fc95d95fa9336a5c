//! End-to-end analysis pipeline.
//!
//! Stages run in a fixed order, each exactly once:
//!
//! 1. Present value (skipped when a present value override is supplied)
//! 2. Allocation
//! 3. Amortization schedule
//! 4. Journal entries
//! 5. Summary and reconciliation

use serde::Serialize;
use tracing::{debug, warn};

use sfc_core::{Contract, SfcError, SfcResult};

use crate::allocation::{allocate, Allocation, TransactionPrice};
use crate::amortization::{build_schedule, AmortizationSchedule, Reconciliation};
use crate::config::AnalysisConfig;
use crate::journal::{generate_journal_entries, JournalEntry};
use crate::present_value::{calculate_present_value, PresentValueAnalysis};

/// Financing percentage above which the component is considered significant.
pub const SIGNIFICANCE_THRESHOLD_PCT: f64 = 5.0;

/// Headline figures of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Customer name.
    pub customer: String,
    /// Up-front cash payment.
    pub cash_received: f64,
    /// Sum of stated period amounts.
    pub total_stated: f64,
    /// Transaction price (total present value).
    pub transaction_price: f64,
    /// Financing component.
    pub financing_component: f64,
    /// Financing component, percent.
    pub financing_pct: f64,
    /// Annual discount rate as a fraction.
    pub discount_rate: f64,
    /// License share, percent.
    pub license_pct: f64,
    /// Support share, percent.
    pub support_pct: f64,
    /// `financing_pct > SIGNIFICANCE_THRESHOLD_PCT`.
    pub is_significant: bool,
}

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    /// Per-period discounting; `None` when the price was overridden.
    pub pv_analysis: Option<PresentValueAnalysis>,
    /// Transaction price and financing component.
    pub transaction_price: TransactionPrice,
    /// License / support split.
    pub allocation: Allocation,
    /// Contract liability schedule.
    pub amortization_schedule: AmortizationSchedule,
    /// Journal entries in posting order.
    pub journal_entries: Vec<JournalEntry>,
    /// Headline figures.
    pub summary: Summary,
    /// Cash against recognized revenue and interest.
    pub reconciliation: Reconciliation,
}

/// Runs the analysis with positional parameters.
///
/// # Errors
///
/// Returns the first `SfcError` raised by validation or any stage.
pub fn analyze(
    contract: &Contract,
    discount_rate: f64,
    license_pct: f64,
    override_pv: Option<f64>,
    use_integer_years: bool,
) -> SfcResult<AnalysisResults> {
    let config = AnalysisConfig {
        discount_rate,
        license_pct,
        override_pv,
        use_integer_years,
    };
    analyze_with_config(contract, &config)
}

/// Runs the analysis.
///
/// # Errors
///
/// Returns the first `SfcError` raised by validation or any stage.
pub fn analyze_with_config(
    contract: &Contract,
    config: &AnalysisConfig,
) -> SfcResult<AnalysisResults> {
    if contract.periods().is_empty() {
        return Err(SfcError::EmptySchedule);
    }
    config.validate()?;

    let overlaps = contract.overlapping_periods();
    if !overlaps.is_empty() {
        warn!(
            customer = contract.customer(),
            periods = ?overlaps,
            "service periods overlap their predecessors"
        );
    }

    debug!(
        customer = contract.customer(),
        periods = contract.period_count(),
        discount_rate = config.discount_rate,
        override_pv = ?config.override_pv,
        "starting analysis"
    );

    let (pv_analysis, transaction_price) = match config.override_pv {
        Some(pv) => (
            None,
            TransactionPrice::from_override(contract.cash_received(), pv)?,
        ),
        None => {
            let pv = calculate_present_value(contract, config.discount_rate, config.convention())?;
            let price = TransactionPrice::from_present_value(&pv);
            (Some(pv), price)
        }
    };

    let allocation = allocate(
        transaction_price.total_pv,
        config.license_pct,
        config.support_pct(),
        contract.period_count(),
    )?;

    let amortization_schedule = build_schedule(
        contract,
        &allocation,
        transaction_price.financing_component,
    )?;

    let journal_entries = generate_journal_entries(contract, &amortization_schedule);

    let reconciliation = amortization_schedule.reconciliation(contract.cash_received());
    if !reconciliation.is_reconciled {
        warn!(
            difference = reconciliation.difference,
            "schedule does not reconcile to cash received"
        );
    }

    let summary = Summary {
        customer: contract.customer().to_string(),
        cash_received: contract.cash_received(),
        total_stated: contract.total_stated(),
        transaction_price: transaction_price.total_pv,
        financing_component: transaction_price.financing_component,
        financing_pct: transaction_price.financing_pct,
        discount_rate: config.discount_rate,
        license_pct: config.license_pct * 100.0,
        support_pct: config.support_pct() * 100.0,
        is_significant: transaction_price.financing_pct > SIGNIFICANCE_THRESHOLD_PCT,
    };

    debug!(
        transaction_price = summary.transaction_price,
        financing_component = summary.financing_component,
        reconciled = reconciliation.is_reconciled,
        "analysis complete"
    );

    Ok(AnalysisResults {
        pv_analysis,
        transaction_price,
        allocation,
        amortization_schedule,
        journal_entries,
        summary,
        reconciliation,
    })
}
