use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::aggregation_failed_response;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let router = Router::new()
        .route("/health", get(crate::routes::health::health))
        .route("/telemetry", get(crate::routes::telemetry::telemetry))
        .with_state(state);

    with_middleware(router)
}

/// CORS for the dashboard origin, request tracing, and panic-to-500 conversion.
pub fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);
    aggregation_failed_response()
}
