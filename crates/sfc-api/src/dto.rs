//! Request and response bodies.

use serde::{Deserialize, Serialize};

use sfc_core::types::ContractInput;
use sfc_engine::{AnalysisConfig, AnalysisResults};

/// Body of `POST /api/analyze`.
///
/// Omitted parameters fall back to the server's analysis defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The contract record.
    #[serde(default)]
    pub contract_data: Option<ContractInput>,
    /// Annual discount rate as a fraction.
    #[serde(default)]
    pub discount_rate: Option<f64>,
    /// License share as a fraction.
    #[serde(default)]
    pub license_pct: Option<f64>,
    /// Manually verified present value.
    #[serde(default)]
    pub override_pv: Option<f64>,
    /// Integer-year (`true`) or actual-day discounting.
    #[serde(default)]
    pub use_integer_years: Option<bool>,
}

impl AnalyzeRequest {
    /// Overlays the request parameters on `defaults`.
    #[must_use]
    pub fn config(&self, defaults: AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            discount_rate: self.discount_rate.unwrap_or(defaults.discount_rate),
            license_pct: self.license_pct.unwrap_or(defaults.license_pct),
            override_pv: self.override_pv.or(defaults.override_pv),
            use_integer_years: self.use_integer_years.unwrap_or(defaults.use_integer_years),
        }
    }
}

/// Successful analysis response.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Always `true`.
    pub success: bool,
    /// Full analysis.
    pub results: AnalysisResults,
    /// Base64 of the `.xlsx` workbook.
    pub excel_file: String,
    /// Base64 of the journal entries CSV.
    pub csv_file: String,
}
