//! Local stand-ins for the Particle cloud and a webhook receiver.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const TOKEN: &str = "test-token";
pub const DEVICE: &str = "e00fce68";

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug)]
pub struct CloudState {
    pub door_status: String,
    pub return_value: i32,
    /// When set, every request answers with this status code.
    pub fail_with: Option<u16>,
    pub delay: Duration,
    pub requests: Vec<Recorded>,
}

impl Default for CloudState {
    fn default() -> Self {
        Self {
            door_status: "closed".to_string(),
            return_value: 1,
            fail_with: None,
            delay: Duration::ZERO,
            requests: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeParticleCloud {
    pub state: Arc<Mutex<CloudState>>,
}

impl FakeParticleCloud {
    /// Starts the stub and returns it with its `/v1` base URL.
    pub async fn start() -> (Self, String) {
        let cloud = Self::default();
        let app = Router::new()
            .route(
                "/v1/devices/:device/:name",
                get(read_variable).post(call_function),
            )
            .with_state(cloud.clone());
        let addr = serve(app).await;
        (cloud, format!("http://{}/v1", addr))
    }

    pub async fn set_door_status(&self, status: &str) {
        self.state.lock().await.door_status = status.to_string();
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.lock().await.requests.clone()
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn record(
    cloud: &FakeParticleCloud,
    path: String,
    headers: &HeaderMap,
    body: String,
) -> Option<(StatusCode, String)> {
    let (delay, fail_with) = {
        let mut state = cloud.state.lock().await;
        state.requests.push(Recorded {
            path,
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        (state.delay, state.fail_with)
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let expected = format!("Bearer {}", TOKEN);
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return Some((StatusCode::UNAUTHORIZED, r#"{"error":"invalid_token"}"#.to_string()));
    }
    fail_with.map(|code| {
        (
            StatusCode::from_u16(code).unwrap(),
            r#"{"error":"stub failure"}"#.to_string(),
        )
    })
}

async fn read_variable(
    State(cloud): State<FakeParticleCloud>,
    Path((device, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let path = format!("/v1/devices/{}/{}", device, name);
    if let Some(failure) = record(&cloud, path, &headers, String::new()).await {
        return failure.into_response();
    }
    let status = cloud.state.lock().await.door_status.clone();
    Json(json!({"cmd": "VarReturn", "name": name, "result": status})).into_response()
}

async fn call_function(
    State(cloud): State<FakeParticleCloud>,
    Path((device, name)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = format!("/v1/devices/{}/{}", device, name);
    let body = String::from_utf8_lossy(&body).to_string();
    if let Some(failure) = record(&cloud, path, &headers, body).await {
        return failure.into_response();
    }
    let return_value = cloud.state.lock().await.return_value;
    Json(json!({"id": device, "connected": true, "return_value": return_value})).into_response()
}

/// A webhook receiver that records every delivery.
#[derive(Clone, Default)]
pub struct FakeWebhook {
    pub deliveries: Arc<Mutex<Vec<(Option<String>, String)>>>,
    pub reject: Arc<Mutex<bool>>,
}

impl FakeWebhook {
    pub async fn start() -> (Self, String) {
        let hook = Self::default();
        let app = Router::new()
            .route("/hook", post(receive))
            .with_state(hook.clone());
        let addr = serve(app).await;
        (hook, format!("http://{}/hook", addr))
    }

    pub async fn deliveries(&self) -> Vec<(Option<String>, String)> {
        self.deliveries.lock().await.clone()
    }
}

async fn receive(State(hook): State<FakeWebhook>, headers: HeaderMap, body: Bytes) -> StatusCode {
    if *hook.reject.lock().await {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    let signature = headers
        .get("x-signature-256")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    hook.deliveries
        .lock()
        .await
        .push((signature, String::from_utf8_lossy(&body).to_string()));
    StatusCode::NO_CONTENT
}
