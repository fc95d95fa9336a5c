//! Date type for contract calculations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{SfcError, SfcResult};

/// A calendar date.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. It serializes as an
/// ISO 8601 string (`YYYY-MM-DD`).
///
/// # Example
///
/// ```rust
/// use sfc_core::types::Date;
///
/// let date = Date::parse("2025-12-31").unwrap();
/// assert_eq!(date.add_days(1).to_string(), "2026-01-01");
/// assert_eq!(date.to_us_string(), "12/31/2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> SfcResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| SfcError::invalid_date("date", format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> SfcResult<Self> {
        Self::parse_field("date", s)
    }

    /// Parses a date, naming the source field in the error.
    ///
    /// # Errors
    ///
    /// Returns `SfcError::InvalidDate` carrying `field` and the raw input.
    pub fn parse_field(field: &str, s: &str) -> SfcResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| SfcError::invalid_date(field, s))
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the date halfway between `self` and `other`, rounded down.
    #[must_use]
    pub fn midpoint(&self, other: &Date) -> Self {
        self.add_days(self.days_between(other).div_euclid(2))
    }

    /// Formats the date as `MM/DD/YYYY`, the layout ERP journal imports expect.
    #[must_use]
    pub fn to_us_string(&self) -> String {
        self.0.format("%m/%d/%Y").to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}
