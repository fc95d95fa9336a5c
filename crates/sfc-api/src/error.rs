//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use sfc_core::SfcError;
use sfc_export::ExportError;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no `contract_data`.
    #[error("Missing contract_data")]
    MissingContractData,

    /// The body could not be read as an analysis request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The contract or parameters were rejected by the engine.
    #[error(transparent)]
    Analysis(#[from] SfcError),

    /// Rendering the export payloads failed.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingContractData => (StatusCode::BAD_REQUEST, "MISSING_CONTRACT_DATA"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Analysis(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.code()),
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error kind.
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "analysis request failed");
        } else {
            tracing::debug!(error = %self, code, "analysis request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
