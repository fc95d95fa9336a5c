//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Discount rate applied when a request omits one.
    pub default_discount_rate: f64,
    /// License share applied when a request omits one.
    pub default_license_pct: f64,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_discount_rate: state.defaults.discount_rate,
        default_license_pct: state.defaults.license_pct,
    })
}
