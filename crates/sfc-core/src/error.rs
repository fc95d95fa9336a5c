//! Error types for the analyzer.
//!
//! Every failure the calculation engine can raise is one variant of
//! [`SfcError`]. Outer layers (export, HTTP, CLI) keep the variant intact and
//! use [`SfcError::code`] to report a stable, machine-readable kind.

use thiserror::Error;

/// A specialized Result type for analyzer operations.
pub type SfcResult<T> = Result<T, SfcError>;

/// The main error type for analyzer operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SfcError {
    /// A required field is absent from an input record.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Dotted path of the missing field (e.g. `periods[2].end`).
        field: String,
    },

    /// A date string could not be parsed as an ISO-8601 calendar date.
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Field the value was read from.
        field: String,
        /// The offending input.
        value: String,
    },

    /// The contract has no service periods.
    #[error("Contract has no service periods")]
    EmptySchedule,

    /// The discount rate makes `(1 + rate)^t` undefined.
    #[error("Degenerate discount rate {rate}: 1 + rate must be positive")]
    DegenerateRate {
        /// The rejected rate.
        rate: f64,
    },

    /// License / support percentages do not form a valid split.
    #[error("Invalid allocation: license {license_pct}, support {support_pct} - {reason}")]
    InvalidAllocation {
        /// License share as a fraction.
        license_pct: f64,
        /// Support share as a fraction.
        support_pct: f64,
        /// Description of what's wrong.
        reason: String,
    },

    /// A monetary amount is not a positive, finite number.
    #[error("Invalid amount for {field}: {value} must be positive and finite")]
    InvalidAmount {
        /// Field the amount was read from.
        field: String,
        /// The rejected amount.
        value: f64,
    },

    /// A service period ends before it starts.
    #[error("Invalid service period {index}: end {end} precedes start {start}")]
    InvalidPeriod {
        /// 1-based ordinal of the period.
        index: usize,
        /// Period start.
        start: String,
        /// Period end.
        end: String,
    },
}

impl SfcError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid allocation error.
    #[must_use]
    pub fn invalid_allocation(license_pct: f64, support_pct: f64, reason: impl Into<String>) -> Self {
        Self::InvalidAllocation {
            license_pct,
            support_pct,
            reason: reason.into(),
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            value,
        }
    }

    /// Returns the stable machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SfcError::MissingField { .. } => "MISSING_FIELD",
            SfcError::InvalidDate { .. } => "INVALID_DATE",
            SfcError::EmptySchedule => "EMPTY_SCHEDULE",
            SfcError::DegenerateRate { .. } => "DEGENERATE_RATE",
            SfcError::InvalidAllocation { .. } => "INVALID_ALLOCATION",
            SfcError::InvalidAmount { .. } => "INVALID_AMOUNT",
            SfcError::InvalidPeriod { .. } => "INVALID_PERIOD",
        }
    }
}
