//! Particle Client - Implementation of DeviceCloud for the Particle cloud API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ParticleClientConfig::new(access_token, device_id)
//!     .with_base_url("https://api.particle.io/v1")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = ParticleClient::new(config)?;
//! ```
//!
//! # Endpoints
//!
//! - `POST {base}/devices/{device}/{function}` with `{"arg": "..."}`
//! - `GET {base}/devices/{device}/{variable}`
//!
//! Both authenticate with a bearer token. A timeout counts as a failed call
//! and is not retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ParticleConfig;
use crate::domain::foundation::DeviceId;
use crate::ports::{DeviceCloud, DeviceCloudError, FunctionResponse};

/// Configuration for the Particle client.
#[derive(Debug, Clone)]
pub struct ParticleClientConfig {
    /// Bearer token; calls fail with `NotConfigured` when absent.
    access_token: Option<Secret<String>>,
    /// Device to address; calls fail with `NotConfigured` when absent.
    pub device_id: Option<DeviceId>,
    /// Base URL including the API version (default: https://api.particle.io/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ParticleClientConfig {
    /// Creates a new configuration for one device.
    pub fn new(access_token: impl Into<String>, device_id: DeviceId) -> Self {
        Self {
            access_token: Some(Secret::new(access_token.into())),
            device_id: Some(device_id),
            base_url: "https://api.particle.io/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds the client configuration from application settings.
    ///
    /// Missing token or device id are carried as `None` and reported on use.
    pub fn from_settings(settings: &ParticleConfig) -> Self {
        Self {
            access_token: settings
                .access_token
                .clone()
                .filter(|t| !t.is_empty())
                .map(Secret::new),
            device_id: settings
                .device_id
                .as_deref()
                .and_then(|d| DeviceId::new(d).ok()),
            base_url: settings.base_url.clone(),
            timeout: settings.timeout(),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the access token (for making requests).
    fn access_token(&self) -> Result<&str, DeviceCloudError> {
        self.access_token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .ok_or(DeviceCloudError::NotConfigured("access token"))
    }

    fn device_id(&self) -> Result<&DeviceId, DeviceCloudError> {
        self.device_id
            .as_ref()
            .ok_or(DeviceCloudError::NotConfigured("device id"))
    }
}

/// Particle cloud API client.
pub struct ParticleClient {
    config: ParticleClientConfig,
    client: Client,
}

impl ParticleClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ParticleClientConfig) -> Result<Self, DeviceCloudError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeviceCloudError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds `{base}/devices/{device}/{name}`.
    fn device_url(&self, name: &str) -> Result<String, DeviceCloudError> {
        let device_id = self.config.device_id()?;
        Ok(format!(
            "{}/devices/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            device_id,
            name
        ))
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, DeviceCloudError> {
        let response = request
            .bearer_auth(self.config.access_token()?)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(DeviceCloudError::http(status.as_u16(), body));
        }
        Ok(body)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> DeviceCloudError {
        if e.is_timeout() {
            DeviceCloudError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            DeviceCloudError::network(format!("Connection failed: {}", e))
        } else {
            DeviceCloudError::network(e.to_string())
        }
    }
}

#[async_trait]
impl DeviceCloud for ParticleClient {
    async fn call_function(
        &self,
        function: &str,
        arg: &str,
    ) -> Result<FunctionResponse, DeviceCloudError> {
        let url = self.device_url(function)?;
        let body = self
            .send(self.client.post(url).json(&FunctionRequest { arg }))
            .await?;

        let parsed = parse_function_response(&body)?;
        tracing::debug!(
            function,
            return_value = parsed.return_value,
            connected = parsed.connected,
            "Particle function response"
        );
        Ok(parsed)
    }

    async fn read_variable(&self, variable: &str) -> Result<String, DeviceCloudError> {
        let url = self.device_url(variable)?;
        let body = self.send(self.client.get(url)).await?;
        parse_variable_response(&body)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct FunctionRequest<'a> {
    arg: &'a str,
}

#[derive(Debug, Deserialize)]
struct ParticleFunctionResponse {
    #[serde(default)]
    connected: Option<bool>,
    return_value: i32,
}

#[derive(Debug, Deserialize)]
struct ParticleVariableResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

fn parse_function_response(body: &str) -> Result<FunctionResponse, DeviceCloudError> {
    let parsed: ParticleFunctionResponse = serde_json::from_str(body)
        .map_err(|e| DeviceCloudError::parse(format!("Failed to parse function response: {}", e)))?;

    Ok(FunctionResponse {
        return_value: parsed.return_value,
        connected: parsed.connected.unwrap_or(true),
    })
}

/// Variables may be strings, numbers or booleans; non-strings are rendered
/// with their JSON text so raw sensor readings pass through.
fn parse_variable_response(body: &str) -> Result<String, DeviceCloudError> {
    let parsed: ParticleVariableResponse = serde_json::from_str(body)
        .map_err(|e| DeviceCloudError::parse(format!("Failed to parse variable response: {}", e)))?;

    if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
        return Err(DeviceCloudError::Device(error));
    }

    match parsed.result {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Null) | None => {
            Err(DeviceCloudError::parse("Variable response has no result"))
        }
        Some(other) => Err(DeviceCloudError::parse(format!(
            "Variable result is not a string: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> DeviceId {
        DeviceId::new("e00fce68").unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = ParticleClientConfig::new("test-token", device())
            .with_base_url("http://localhost:9000/v1")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.access_token().unwrap(), "test-token");
        assert_eq!(config.device_id().unwrap(), &device());
    }

    #[test]
    fn config_from_settings_tolerates_missing_values() {
        let config = ParticleClientConfig::from_settings(&ParticleConfig::default());
        assert_eq!(
            config.access_token(),
            Err(DeviceCloudError::NotConfigured("access token"))
        );
        assert_eq!(
            config.device_id().err(),
            Some(DeviceCloudError::NotConfigured("device id"))
        );
    }

    #[test]
    fn device_url_joins_segments() {
        let config = ParticleClientConfig::new("t", device()).with_base_url("http://host/v1/");
        let client = ParticleClient::new(config).unwrap();
        assert_eq!(
            client.device_url("doorStatus").unwrap(),
            "http://host/v1/devices/e00fce68/doorStatus"
        );
    }

    #[test]
    fn parses_function_response() {
        let body = r#"{"id":"e00fce68","name":"garage","last_app":"","connected":true,"return_value":1,"execution_time":12}"#;
        let resp = parse_function_response(body).unwrap();
        assert_eq!(resp.return_value, 1);
        assert!(resp.connected);
    }

    #[test]
    fn function_response_without_return_value_is_parse_error() {
        let err = parse_function_response(r#"{"connected":true}"#).unwrap_err();
        assert!(matches!(err, DeviceCloudError::Parse(_)));
    }

    #[test]
    fn parses_string_variable() {
        let body = r#"{"cmd":"VarReturn","name":"doorStatus","result":"open"}"#;
        assert_eq!(parse_variable_response(body).unwrap(), "open");
    }

    #[test]
    fn non_string_variable_is_parse_error() {
        for body in [
            r#"{"result":42.5}"#,
            r#"{"result":true}"#,
            r#"{"result":{"cm":42}}"#,
            r#"{"result":["open"]}"#,
        ] {
            let err = parse_variable_response(body).unwrap_err();
            assert!(matches!(err, DeviceCloudError::Parse(_)), "{} gave {:?}", body, err);
        }
    }

    #[test]
    fn variable_error_field_is_device_error() {
        let err = parse_variable_response(r#"{"error":"Timed out."}"#).unwrap_err();
        assert_eq!(err, DeviceCloudError::Device("Timed out.".to_string()));
    }

    #[test]
    fn malformed_variable_body_is_parse_error() {
        let err = parse_variable_response("<html>").unwrap_err();
        assert!(matches!(err, DeviceCloudError::Parse(_)));
    }
}
