//! Contract analysis endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use sfc_engine::analyze_with_config;
use sfc_export::AnalysisExports;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Runs one analysis and returns it with both export payloads.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let config = req.config(state.defaults);
    let contract = req
        .contract_data
        .ok_or(ApiError::MissingContractData)?
        .into_contract()?;

    let results = analyze_with_config(&contract, &config)?;
    let exports = AnalysisExports::render(&results)?;

    info!(
        customer = contract.customer(),
        periods = contract.period_count(),
        financing_component = results.summary.financing_component,
        "contract analyzed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        excel_file: exports.workbook_base64(),
        csv_file: exports.journal_base64(),
        results,
    }))
}
