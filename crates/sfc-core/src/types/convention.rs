//! Discount horizon conventions.
//!
//! A horizon is the number of years between the payment date and the point a
//! period's stated amount is considered delivered.
//!
//! - [`DiscountConvention::IntegerYears`]: period `n` is discounted `n` years.
//! - [`DiscountConvention::ActualDays`]: actual days from payment date to the
//!   period end, over an average Julian year of 365.25 days.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Days per year used by [`DiscountConvention::ActualDays`].
pub const DAYS_PER_YEAR: f64 = 365.25;

/// How the discount horizon of a service period is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountConvention {
    /// Ordinal position of the period (1, 2, 3, ...).
    #[default]
    IntegerYears,
    /// ACT/365.25 from the payment date to the period end date.
    ActualDays,
}

impl DiscountConvention {
    /// Selects the convention from the `use_integer_years` flag.
    #[must_use]
    pub fn from_integer_years(use_integer_years: bool) -> Self {
        if use_integer_years {
            DiscountConvention::IntegerYears
        } else {
            DiscountConvention::ActualDays
        }
    }

    /// Returns the horizon in years.
    ///
    /// # Arguments
    ///
    /// * `ordinal` - 1-based position of the period
    /// * `payment_date` - Date the cash was received
    /// * `period_end` - Last day of the service period
    #[must_use]
    pub fn horizon_years(&self, ordinal: usize, payment_date: Date, period_end: Date) -> f64 {
        match self {
            DiscountConvention::IntegerYears => ordinal as f64,
            DiscountConvention::ActualDays => {
                payment_date.days_between(&period_end) as f64 / DAYS_PER_YEAR
            }
        }
    }
}

impl fmt::Display for DiscountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscountConvention::IntegerYears => "Integer Years",
            DiscountConvention::ActualDays => "ACT/365.25",
        };
        write!(f, "{name}")
    }
}
