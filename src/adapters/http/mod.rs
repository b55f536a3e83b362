//! HTTP adapters - REST API implementations.

pub mod door;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use door::{door_router, DoorAppState};

/// Full application router with request tracing and a per-request timeout.
pub fn app_router(state: DoorAppState, request_timeout: Duration) -> Router {
    door_router()
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
