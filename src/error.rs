use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Generic message returned to callers when aggregation as a whole fails.
pub const AGGREGATION_FAILED_MESSAGE: &str = "Failed to fetch telemetry data";

/// Failure of a single upstream call. Always recovered into that source's fallback value.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{source_name} returned HTTP {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{source_name} sent a malformed body: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    #[error("{source_name} reported an error: {message}")]
    Payload {
        source_name: &'static str,
        message: String,
    },
}

/// Aggregator-level failure. Surfaced as HTTP 500.
#[allow(dead_code)]
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid response header: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for TelemetryError {
    fn into_response(self) -> Response {
        error!("Telemetry aggregation failed: {}", self);
        aggregation_failed_response()
    }
}

/// The 500 `{ "error": ... }` body. The cause is logged, never sent to the caller.
pub fn aggregation_failed_response() -> Response {
    let body = serde_json::json!({
        "error": AGGREGATION_FAILED_MESSAGE,
    });

    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}
