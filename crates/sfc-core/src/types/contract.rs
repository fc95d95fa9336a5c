//! Contract model: one up-front payment followed by a sequence of service periods.

use serde::Serialize;

use super::Date;
use crate::error::{SfcError, SfcResult};

/// A single service period with its stated (nominal) amount.
///
/// # Example
///
/// ```rust
/// use sfc_core::types::{Date, ServicePeriod};
///
/// let period = ServicePeriod::new(
///     Date::parse("2025-12-31").unwrap(),
///     Date::parse("2026-12-30").unwrap(),
///     420_000.0,
/// )
/// .unwrap();
/// assert_eq!(period.stated_amount(), 420_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServicePeriod {
    start: Date,
    end: Date,
    stated_amount: f64,
}

impl ServicePeriod {
    /// Creates a service period.
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidPeriod` if `end < start` and
    /// `SfcError::InvalidAmount` if the stated amount is not positive.
    pub fn new(start: Date, end: Date, stated_amount: f64) -> SfcResult<Self> {
        Self::validated(1, start, end, stated_amount)
    }

    /// Creates a service period, reporting `index` (1-based) in errors.
    pub(crate) fn validated(
        index: usize,
        start: Date,
        end: Date,
        stated_amount: f64,
    ) -> SfcResult<Self> {
        if end < start {
            return Err(SfcError::InvalidPeriod {
                index,
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        ensure_positive(&format!("periods[{}].stated_amount", index - 1), stated_amount)?;
        Ok(Self {
            start,
            end,
            stated_amount,
        })
    }

    /// Returns the first day of service.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of service.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the stated (undiscounted) amount for the period.
    #[must_use]
    pub fn stated_amount(&self) -> f64 {
        self.stated_amount
    }

    /// Returns the midpoint of the service period.
    #[must_use]
    pub fn midpoint(&self) -> Date {
        self.start.midpoint(&self.end)
    }
}

/// A customer contract paid in full up front.
///
/// The period sequence is expected to be chronological and non-overlapping.
/// That ordering is the caller's responsibility; only `end >= start` inside a
/// single period is checked here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    customer: String,
    cash_received: f64,
    payment_date: Date,
    periods: Vec<ServicePeriod>,
}

impl Contract {
    /// Creates a contract.
    ///
    /// An empty period list is accepted here and rejected by the engine, so
    /// that the failure surfaces as `EmptySchedule` at analysis time.
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidAmount` if `cash_received` is not positive.
    pub fn new(
        customer: impl Into<String>,
        cash_received: f64,
        payment_date: Date,
        periods: Vec<ServicePeriod>,
    ) -> SfcResult<Self> {
        ensure_positive("cash_received", cash_received)?;
        Ok(Self {
            customer: customer.into(),
            cash_received,
            payment_date,
            periods,
        })
    }

    /// Returns the customer name.
    #[must_use]
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Returns the up-front cash payment.
    #[must_use]
    pub fn cash_received(&self) -> f64 {
        self.cash_received
    }

    /// Returns the date the cash was received.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the service periods in contract order.
    #[must_use]
    pub fn periods(&self) -> &[ServicePeriod] {
        &self.periods
    }

    /// Returns the number of service periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Returns the sum of all stated amounts.
    #[must_use]
    pub fn total_stated(&self) -> f64 {
        self.periods.iter().map(ServicePeriod::stated_amount).sum()
    }

    /// Returns the 1-based ordinals of periods that start before the previous
    /// period ends.
    #[must_use]
    pub fn overlapping_periods(&self) -> Vec<usize> {
        self.periods
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].start() < pair[0].end())
            .map(|(i, _)| i + 2)
            .collect()
    }
}

fn ensure_positive(field: &str, value: f64) -> SfcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SfcError::invalid_amount(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_period_rejects_reversed_dates() {
        let err = ServicePeriod::new(d("2026-12-30"), d("2025-12-31"), 100.0).unwrap_err();
        assert_eq!(err.code(), "INVALID_PERIOD");
    }

    #[test]
    fn test_period_allows_single_day() {
        let p = ServicePeriod::new(d("2026-01-01"), d("2026-01-01"), 1.0).unwrap();
        assert_eq!(p.midpoint(), d("2026-01-01"));
    }

    #[test]
    fn test_period_rejects_non_positive_amount() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ServicePeriod::new(d("2026-01-01"), d("2026-12-31"), amount).unwrap_err();
            assert_eq!(err.code(), "INVALID_AMOUNT");
        }
    }

    #[test]
    fn test_contract_totals() {
        let periods = vec![
            ServicePeriod::new(d("2025-12-31"), d("2026-12-30"), 420_000.0).unwrap(),
            ServicePeriod::new(d("2026-12-31"), d("2027-12-30"), 380_000.0).unwrap(),
        ];
        let contract = Contract::new("Deka Bank", 800_000.0, d("2025-12-31"), periods).unwrap();
        assert_eq!(contract.period_count(), 2);
        assert_eq!(contract.total_stated(), 800_000.0);
        assert!(contract.overlapping_periods().is_empty());
    }

    #[test]
    fn test_contract_rejects_zero_cash() {
        let err = Contract::new("X", 0.0, d("2025-12-31"), vec![]).unwrap_err();
        assert_eq!(err, SfcError::invalid_amount("cash_received", 0.0));
    }

    #[test]
    fn test_overlap_detection() {
        let periods = vec![
            ServicePeriod::new(d("2025-01-01"), d("2025-12-31"), 1.0).unwrap(),
            ServicePeriod::new(d("2025-06-01"), d("2026-05-31"), 1.0).unwrap(),
            ServicePeriod::new(d("2026-06-01"), d("2027-05-31"), 1.0).unwrap(),
        ];
        let contract = Contract::new("X", 3.0, d("2025-01-01"), periods).unwrap();
        assert_eq!(contract.overlapping_periods(), vec![2]);
    }
}
