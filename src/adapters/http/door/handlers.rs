//! HTTP handlers for the door endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{DoorMonitor, VoiceCommandHandler};
use crate::domain::voice::VoiceRequest;

use super::dto::{ErrorResponse, HealthResponse, MonitorRunResponse};

/// Shared state for the door endpoints.
#[derive(Clone)]
pub struct DoorAppState {
    pub voice: Arc<VoiceCommandHandler>,
    pub monitor: Arc<DoorMonitor>,
}

/// POST /voice
///
/// Always 200 with a response envelope, including for malformed bodies.
pub async fn handle_voice(State(state): State<DoorAppState>, body: Bytes) -> impl IntoResponse {
    let request = VoiceRequest::from_slice(&body);
    Json(state.voice.handle(&request).await)
}

/// POST /monitor/run
pub async fn run_monitor(State(state): State<DoorAppState>) -> impl IntoResponse {
    match state.monitor.poll().await {
        Ok(report) => (StatusCode::OK, Json(MonitorRunResponse::from(report))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Monitor run failed");
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::default())
}
