use axum::extract::State;
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::TelemetryError;
use crate::state::SharedState;
use crate::telemetry_cache;

/// GET /telemetry — combined third-party profile statistics.
///
/// Always 200 when aggregation completes, even if every upstream failed; those
/// sources carry their fallback values. 500 only for aggregator-level failures.
pub async fn telemetry(State(state): State<SharedState>) -> Result<Response, TelemetryError> {
    let payload = telemetry_cache::get_or_refresh(&state).await?;

    let mut resp = Json(payload).into_response();
    resp.headers_mut().insert(
        CACHE_CONTROL,
        HeaderValue::from_str(&cache_control_value(state.config.cache_ttl_secs))?,
    );
    Ok(resp)
}

pub fn cache_control_value(ttl_secs: u64) -> String {
    if ttl_secs == 0 {
        "no-store".to_string()
    } else {
        format!("public, max-age={}", ttl_secs)
    }
}
