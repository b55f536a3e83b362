//! Axum router for the door endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_voice, health, run_monitor, DoorAppState};

/// # Routes
///
/// - `POST /voice` - voice platform webhook
/// - `POST /monitor/run` - run one monitor cycle now
/// - `GET /health` - liveness
pub fn door_router() -> Router<DoorAppState> {
    Router::new()
        .route("/voice", post(handle_voice))
        .route("/monitor/run", post(run_monitor))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::notification::InMemoryNotifier;
    use crate::adapters::particle::MockDeviceCloud;
    use crate::adapters::storage::InMemoryDoorStateStore;
    use crate::application::{DoorMonitor, DoorStateRecorder, VoiceCommandHandler};
    use crate::domain::foundation::DeviceId;
    use crate::ports::DeviceCloudError;

    fn app(cloud: MockDeviceCloud) -> Router {
        let recorder = DoorStateRecorder::new(
            Arc::new(InMemoryDoorStateStore::new("doors")),
            Some(DeviceId::new("dev-1").unwrap()),
            120,
        );
        let state = DoorAppState {
            voice: Arc::new(VoiceCommandHandler::new(
                Arc::new(cloud.clone()),
                recorder.clone(),
            )),
            monitor: Arc::new(DoorMonitor::new(
                Arc::new(cloud),
                Arc::new(InMemoryNotifier::new()),
                recorder,
            )),
        };
        door_router().with_state(state)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn voice_launch_returns_envelope() {
        let response = app(MockDeviceCloud::new())
            .oneshot(post("/voice", r#"{"request":{"type":"LaunchRequest"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["version"], "1.0");
        assert_eq!(body["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(body["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn voice_malformed_body_is_still_200() {
        let response = app(MockDeviceCloud::new())
            .oneshot(post("/voice", "{{{"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["response"]["outputSpeech"]["text"],
            "I don't understand that request."
        );
    }

    #[tokio::test]
    async fn monitor_run_reports_cycle() {
        let response = app(MockDeviceCloud::new().with_door_status("open"))
            .oneshot(post("/monitor/run", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["doorStatus"], "open");
        assert_eq!(body["previousStatus"], "unknown");
        assert_eq!(body["transitioned"], true);
        assert_eq!(body["notification"], "not_due");
    }

    #[tokio::test]
    async fn monitor_run_failure_is_bad_gateway() {
        let cloud = MockDeviceCloud::new().with_variable_error(DeviceCloudError::network("down"));
        let response = app(cloud)
            .oneshot(post("/monitor/run", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("down"));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app(MockDeviceCloud::new())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
