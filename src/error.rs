//! Error types for the analysis cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Analysis Error Enum ==
/// Unified error type for the analysis cache service.
///
/// Remote-call failures are never cached and always surfaced to the caller;
/// the cache only decides whether to invoke the remote analyzer at all and
/// whether to persist its output.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No cached result for the requested fingerprint
    #[error("No cached result for fingerprint: {0}")]
    NotFound(String),

    /// Invalid request data (missing upload, malformed fingerprint)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote analysis call failed (network, non-success status, timeout)
    #[error("Remote analysis failed: {0}")]
    RemoteCall(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AnalysisError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AnalysisError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AnalysisError::RemoteCall(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AnalysisError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the analysis cache service.
pub type Result<T> = std::result::Result<T, AnalysisError>;
