//! Analysis configuration.

use serde::{Deserialize, Serialize};

use sfc_core::{DiscountConvention, SfcError, SfcResult};

/// Default annual discount rate (6%).
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.06;

/// Default share of the transaction price allocated to the license (20%).
pub const DEFAULT_LICENSE_PCT: f64 = 0.20;

/// Tolerance for `license_pct + support_pct == 1`.
const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// Parameters for one analysis run.
///
/// Missing fields fall back to their defaults when deserialized, so a TOML
/// file or JSON body only needs to name what it changes.
///
/// # Example
///
/// ```rust
/// use sfc_engine::AnalysisConfig;
///
/// let config = AnalysisConfig::default()
///     .with_discount_rate(0.05)
///     .with_license_pct(0.25);
/// assert_eq!(config.support_pct(), 0.75);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Annual discount rate as a fraction (0.06 = 6%).
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// License share of the transaction price, in [0, 1].
    #[serde(default = "default_license_pct")]
    pub license_pct: f64,

    /// Manually verified present value; bypasses date-based discounting.
    #[serde(default)]
    pub override_pv: Option<f64>,

    /// Discount period `n` over `n` years instead of ACT/365.25 to its end date.
    #[serde(default = "default_true")]
    pub use_integer_years: bool,
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

fn default_license_pct() -> f64 {
    DEFAULT_LICENSE_PCT
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            license_pct: DEFAULT_LICENSE_PCT,
            override_pv: None,
            use_integer_years: true,
        }
    }
}

impl AnalysisConfig {
    /// Sets the discount rate.
    #[must_use]
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Sets the license share.
    #[must_use]
    pub fn with_license_pct(mut self, pct: f64) -> Self {
        self.license_pct = pct;
        self
    }

    /// Sets (or clears) the present value override.
    #[must_use]
    pub fn with_override_pv(mut self, pv: Option<f64>) -> Self {
        self.override_pv = pv;
        self
    }

    /// Selects integer-year or actual-day discounting.
    #[must_use]
    pub fn with_integer_years(mut self, use_integer_years: bool) -> Self {
        self.use_integer_years = use_integer_years;
        self
    }

    /// Returns the support share, `1 - license_pct`.
    #[must_use]
    pub fn support_pct(&self) -> f64 {
        1.0 - self.license_pct
    }

    /// Returns the discount horizon convention selected by `use_integer_years`.
    #[must_use]
    pub fn convention(&self) -> DiscountConvention {
        DiscountConvention::from_integer_years(self.use_integer_years)
    }

    /// Checks the allocation split, then the override or, when discounting,
    /// the rate.
    ///
    /// The rate is never used with an override, so it is not checked then.
    ///
    /// # Errors
    ///
    /// `DegenerateRate`, `InvalidAllocation` or `InvalidAmount`.
    pub fn validate(&self) -> SfcResult<()> {
        validate_split(self.license_pct, self.support_pct())?;
        match self.override_pv {
            Some(pv) if !(pv.is_finite() && pv > 0.0) => {
                Err(SfcError::invalid_amount("override_pv", pv))
            }
            Some(_) => Ok(()),
            None => validate_rate(self.discount_rate),
        }
    }
}

/// Rejects rates for which `(1 + rate)^t` is undefined or non-positive.
pub(crate) fn validate_rate(rate: f64) -> SfcResult<()> {
    if rate.is_finite() && 1.0 + rate > 0.0 {
        Ok(())
    } else {
        Err(SfcError::DegenerateRate { rate })
    }
}

/// Rejects license / support splits outside [0, 1] or not summing to one.
pub(crate) fn validate_split(license_pct: f64, support_pct: f64) -> SfcResult<()> {
    if !license_pct.is_finite() || !(0.0..=1.0).contains(&license_pct) {
        return Err(SfcError::invalid_allocation(
            license_pct,
            support_pct,
            "license share must be within [0, 1]",
        ));
    }
    if (license_pct + support_pct - 1.0).abs() > ALLOCATION_TOLERANCE {
        return Err(SfcError::invalid_allocation(
            license_pct,
            support_pct,
            "license and support shares must sum to 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.discount_rate, 0.06);
        assert_eq!(config.license_pct, 0.20);
        assert_eq!(config.override_pv, None);
        assert!(config.use_integer_years);
        assert_eq!(config.convention(), DiscountConvention::IntegerYears);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"discount_rate": 0.08}"#).unwrap();
        assert_eq!(config.discount_rate, 0.08);
        assert_eq!(config.license_pct, DEFAULT_LICENSE_PCT);
        assert!(config.use_integer_years);
    }

    #[test]
    fn test_degenerate_rates() {
        for rate in [-1.0, -1.5, f64::NAN, f64::INFINITY] {
            let err = AnalysisConfig::default()
                .with_discount_rate(rate)
                .validate()
                .unwrap_err();
            assert_eq!(err.code(), "DEGENERATE_RATE");
        }
        assert!(AnalysisConfig::default().with_discount_rate(0.0).validate().is_ok());
        assert!(AnalysisConfig::default().with_discount_rate(-0.5).validate().is_ok());
    }

    #[test]
    fn test_override_ignores_rate() {
        for rate in [-1.0, -3.0, f64::NAN] {
            let config = AnalysisConfig::default()
                .with_discount_rate(rate)
                .with_override_pv(Some(1_800_000.0));
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_license_pct_bounds() {
        for pct in [-0.01, 1.01, f64::NAN] {
            let err = AnalysisConfig::default()
                .with_license_pct(pct)
                .validate()
                .unwrap_err();
            assert_eq!(err.code(), "INVALID_ALLOCATION");
        }
        assert!(AnalysisConfig::default().with_license_pct(0.0).validate().is_ok());
        assert!(AnalysisConfig::default().with_license_pct(1.0).validate().is_ok());
    }

    #[test]
    fn test_split_must_sum_to_one() {
        assert!(validate_split(0.2, 0.8).is_ok());
        let err = validate_split(0.2, 0.7).unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn test_override_must_be_positive() {
        let err = AnalysisConfig::default()
            .with_override_pv(Some(0.0))
            .validate()
            .unwrap_err();
        assert_eq!(err, SfcError::invalid_amount("override_pv", 0.0));
    }
}
