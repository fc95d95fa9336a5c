//! Contract liability amortization schedule.
//!
//! The schedule starts with a License Delivery row at the payment date,
//! followed by one row per service period. Interest on the liability is not
//! compounded period by period; the known financing component is distributed
//! across periods in proportion to the liability balance outstanding before
//! each period's support revenue is recognized:
//!
//! ```text
//! w_i        = B_0 - (i - 1) * annual_support
//! interest_i = financing * w_i / sum(w)
//! ```
//!
//! where `B_0` is the liability remaining after license delivery.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

use sfc_core::types::{Contract, Date};
use sfc_core::{SfcError, SfcResult};

use crate::allocation::Allocation;

/// Tolerance, in currency units, for the cash reconciliation.
pub const RECONCILIATION_TOLERANCE: f64 = 1.0;

/// Label of a schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodLabel {
    /// Point-in-time transfer of the license.
    LicenseDelivery,
    /// Service period `n` (1-based).
    Year(usize),
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodLabel::LicenseDelivery => write!(f, "License Delivery"),
            PeriodLabel::Year(n) => write!(f, "Year {n}"),
        }
    }
}

impl Serialize for PeriodLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleRow {
    /// Row label.
    pub period: PeriodLabel,
    /// Date the row's revenue is recognized.
    pub date: Date,
    /// Liability at the start of the row.
    pub opening_liability: f64,
    /// Interest accreted on the liability.
    pub interest_income: f64,
    /// Revenue released from the liability.
    pub revenue_recognized: f64,
    /// `opening + interest - revenue`.
    pub ending_liability: f64,
}

impl ScheduleRow {
    fn new(period: PeriodLabel, date: Date, opening: f64, interest: f64, revenue: f64) -> Self {
        Self {
            period,
            date,
            opening_liability: opening,
            interest_income: interest,
            revenue_recognized: revenue,
            ending_liability: opening + interest - revenue,
        }
    }
}

/// Cash received compared with everything the schedule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Up-front cash payment.
    pub cash_received: f64,
    /// License plus support revenue.
    pub total_revenue: f64,
    /// Interest income over all rows.
    pub total_interest: f64,
    /// `cash_received - (total_revenue + total_interest)`.
    pub difference: f64,
    /// Ending liability of the last row.
    pub residual_liability: f64,
    /// `|difference| <= RECONCILIATION_TOLERANCE`.
    pub is_reconciled: bool,
}

/// The full schedule, License Delivery row first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationSchedule {
    rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    /// Returns the rows in order.
    #[must_use]
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Returns the number of rows (`period_count + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the schedule has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the License Delivery row.
    #[must_use]
    pub fn license_row(&self) -> Option<&ScheduleRow> {
        self.rows.first()
    }

    /// Returns the per-period rows.
    #[must_use]
    pub fn period_rows(&self) -> &[ScheduleRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Sum of interest income.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest_income).sum()
    }

    /// Sum of revenue recognized, license included.
    #[must_use]
    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.revenue_recognized).sum()
    }

    /// Ending liability of the last row.
    #[must_use]
    pub fn final_ending_liability(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.ending_liability)
    }

    /// Reconciles the schedule against the cash received.
    #[must_use]
    pub fn reconciliation(&self, cash_received: f64) -> Reconciliation {
        let total_revenue = self.total_revenue();
        let total_interest = self.total_interest();
        let difference = cash_received - (total_revenue + total_interest);
        Reconciliation {
            cash_received,
            total_revenue,
            total_interest,
            difference,
            residual_liability: self.final_ending_liability(),
            is_reconciled: difference.abs() <= RECONCILIATION_TOLERANCE,
        }
    }
}

/// Liability balances before each period's support is released.
///
/// Starts at `initial_balance` and steps down by `annual_support`.
#[must_use]
pub fn interest_weights(initial_balance: f64, annual_support: f64, periods: usize) -> Vec<f64> {
    (0..periods)
        .map(|i| initial_balance - i as f64 * annual_support)
        .collect()
}

/// Distributes `financing_component` across periods by `weights`.
///
/// Falls back to an even spread when the weights sum to zero or overflow.
fn distribute_interest(financing_component: f64, weights: &[f64]) -> Vec<f64> {
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 || !total_weight.is_finite() {
        warn!(
            total_weight,
            periods = weights.len(),
            "degenerate interest weights, spreading financing evenly"
        );
        let even = financing_component / weights.len() as f64;
        return vec![even; weights.len()];
    }
    weights
        .iter()
        .map(|w| financing_component * w / total_weight)
        .collect()
}

/// Builds the schedule for `contract` from its allocation and financing.
///
/// # Errors
///
/// Returns `SfcError::EmptySchedule` if the contract has no periods.
pub fn build_schedule(
    contract: &Contract,
    allocation: &Allocation,
    financing_component: f64,
) -> SfcResult<AmortizationSchedule> {
    let periods = contract.periods();
    if periods.is_empty() {
        return Err(SfcError::EmptySchedule);
    }

    let mut rows = Vec::with_capacity(periods.len() + 1);
    let license = ScheduleRow::new(
        PeriodLabel::LicenseDelivery,
        contract.payment_date(),
        contract.cash_received(),
        0.0,
        allocation.license_revenue,
    );
    rows.push(license);

    let weights = interest_weights(
        license.ending_liability,
        allocation.annual_support,
        periods.len(),
    );
    let interest = distribute_interest(financing_component, &weights);

    let mut opening = license.ending_liability;
    for (i, (period, interest_i)) in periods.iter().zip(interest).enumerate() {
        let row = ScheduleRow::new(
            PeriodLabel::Year(i + 1),
            period.end(),
            opening,
            interest_i,
            allocation.annual_support,
        );
        opening = row.ending_liability;
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        final_liability = opening,
        "amortization schedule built"
    );

    Ok(AmortizationSchedule { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use approx::assert_relative_eq;
    use sfc_core::types::ServicePeriod;

    fn contract(n: i32, cash: f64, stated: f64) -> Contract {
        let periods = (0..n)
            .map(|i| {
                ServicePeriod::new(
                    Date::from_ymd(2025 + i, 12, 31).unwrap(),
                    Date::from_ymd(2026 + i, 12, 30).unwrap(),
                    stated,
                )
                .unwrap()
            })
            .collect();
        Contract::new("Test", cash, Date::from_ymd(2025, 12, 31).unwrap(), periods).unwrap()
    }

    #[test]
    fn test_weights() {
        assert_eq!(interest_weights(1000.0, 200.0, 3), vec![1000.0, 800.0, 600.0]);
        assert!(interest_weights(1000.0, 200.0, 0).is_empty());
    }

    #[test]
    fn test_schedule_shape() {
        let c = contract(3, 3000.0, 1000.0);
        let alloc = allocate(2700.0, 0.2, 0.8, 3).unwrap();
        let schedule = build_schedule(&c, &alloc, 300.0).unwrap();

        assert_eq!(schedule.len(), 4);
        let license = schedule.license_row().unwrap();
        assert_eq!(license.period, PeriodLabel::LicenseDelivery);
        assert_eq!(license.date, c.payment_date());
        assert_eq!(license.opening_liability, 3000.0);
        assert_eq!(license.interest_income, 0.0);
        assert_relative_eq!(license.revenue_recognized, 540.0, epsilon = 1e-9);

        for (i, row) in schedule.period_rows().iter().enumerate() {
            assert_eq!(row.period, PeriodLabel::Year(i + 1));
            assert_eq!(row.date, c.periods()[i].end());
            assert_eq!(row.revenue_recognized, alloc.annual_support);
        }
    }

    #[test]
    fn test_row_chaining() {
        let c = contract(4, 4000.0, 1000.0);
        let alloc = allocate(3500.0, 0.25, 0.75, 4).unwrap();
        let schedule = build_schedule(&c, &alloc, 500.0).unwrap();

        for pair in schedule.rows().windows(2) {
            assert_eq!(pair[1].opening_liability, pair[0].ending_liability);
        }
        for row in schedule.rows() {
            assert_eq!(
                row.ending_liability,
                row.opening_liability + row.interest_income - row.revenue_recognized
            );
        }
    }

    #[test]
    fn test_interest_proportional_to_weights() {
        let c = contract(3, 3000.0, 1000.0);
        let alloc = allocate(2700.0, 0.2, 0.8, 3).unwrap();
        let schedule = build_schedule(&c, &alloc, 300.0).unwrap();

        // B0 = 2460, annual = 720 -> weights 2460, 1740, 1020
        let w = [2460.0, 1740.0, 1020.0];
        let total: f64 = w.iter().sum();
        for (row, wi) in schedule.period_rows().iter().zip(w) {
            assert_relative_eq!(row.interest_income, 300.0 * wi / total, epsilon = 1e-9);
        }
        assert_relative_eq!(schedule.total_interest(), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reconciliation_and_residual() {
        let c = contract(3, 3000.0, 1000.0);
        let alloc = allocate(2700.0, 0.2, 0.8, 3).unwrap();
        let schedule = build_schedule(&c, &alloc, 300.0).unwrap();
        let rec = schedule.reconciliation(3000.0);

        assert!(rec.is_reconciled);
        assert_relative_eq!(rec.difference, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rec.total_revenue, 2700.0, epsilon = 1e-9);
        // cash - total_pv + financing
        assert_relative_eq!(rec.residual_liability, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_financing_runs_off() {
        let c = contract(2, 2000.0, 1000.0);
        let alloc = allocate(2000.0, 0.2, 0.8, 2).unwrap();
        let schedule = build_schedule(&c, &alloc, 0.0).unwrap();
        assert_relative_eq!(schedule.final_ending_liability(), 0.0, epsilon = 1e-9);
        assert_eq!(schedule.total_interest(), 0.0);
    }

    #[test]
    fn test_degenerate_weights_spread_evenly() {
        // All license: B0 = 0 and annual support = 0, so every weight is 0.
        let c = contract(2, 1000.0, 600.0);
        let alloc = allocate(1000.0, 1.0, 0.0, 2).unwrap();
        let schedule = build_schedule(&c, &alloc, 200.0).unwrap();
        for row in schedule.period_rows() {
            assert_eq!(row.interest_income, 100.0);
        }
    }

    #[test]
    fn test_empty_contract() {
        let c = Contract::new("X", 1.0, Date::from_ymd(2025, 1, 1).unwrap(), vec![]).unwrap();
        let alloc = allocate(1.0, 0.2, 0.8, 1).unwrap();
        assert_eq!(
            build_schedule(&c, &alloc, 0.0).unwrap_err(),
            SfcError::EmptySchedule
        );
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(PeriodLabel::LicenseDelivery.to_string(), "License Delivery");
        assert_eq!(
            serde_json::to_string(&PeriodLabel::Year(3)).unwrap(),
            "\"Year 3\""
        );
    }
}
