//! Error types for the content relay
//!
//! Provides unified error handling using thiserror. Storage faults never
//! escape the cache layer; only upstream-fetch faults reach the HTTP
//! boundary, each as a fixed status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Internal storage-layer failure. Logged and swallowed at the store's
/// public boundary; a read fault is indistinguishable from a miss.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Disk read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry (de)serialization failure
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

// == Upstream Error Enum ==
/// Failure of an outbound fetch against the upstream content API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The fetch exceeded the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// The upstream answered with a non-2xx status
    #[error("upstream returned status {status}")]
    Status { status: u16, body: String },

    /// Connection, protocol or payload failure
    #[error("upstream request failed: {0}")]
    Network(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        match self {
            UpstreamError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": "upstream request timed out" })),
            )
                .into_response(),
            UpstreamError::Status { status, body } => {
                // Pass the upstream status through with an error payload.
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let message = if body.is_empty() {
                    format!("upstream returned {}", status)
                } else {
                    body
                };
                (status, Json(json!({ "error": message }))).into_response()
            }
            UpstreamError::Network(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
