//! Device Cloud Port - Interface to the vendor IoT cloud.
//!
//! The cloud exposes two operations for one physical device: calling a
//! firmware function (the relay trigger) and reading a firmware variable
//! (the door sensor status).
//!
//! # Example
//!
//! ```ignore
//! let response = cloud.call_function("pressButton", "").await?;
//! let outcome = ButtonPressOutcome::from_return_value(response.return_value);
//!
//! let raw = cloud.read_variable("doorStatus").await?;
//! let status = DoorStatus::parse(&raw);
//! ```

use async_trait::async_trait;

/// Firmware function that pulses the opener relay.
pub const PRESS_BUTTON_FUNCTION: &str = "pressButton";

/// Firmware variable holding the door sensor status.
pub const DOOR_STATUS_VARIABLE: &str = "doorStatus";

/// Port for calling functions and reading variables on the door controller.
#[async_trait]
pub trait DeviceCloud: Send + Sync {
    /// Invokes a firmware function with a string argument.
    async fn call_function(
        &self,
        function: &str,
        arg: &str,
    ) -> Result<FunctionResponse, DeviceCloudError>;

    /// Reads a firmware variable as a string.
    async fn read_variable(&self, variable: &str) -> Result<String, DeviceCloudError>;
}

/// Result of a firmware function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionResponse {
    /// Integer the firmware function returned.
    pub return_value: i32,
    /// Whether the cloud reported the device as connected.
    pub connected: bool,
}

impl FunctionResponse {
    pub fn new(return_value: i32) -> Self {
        Self {
            return_value,
            connected: true,
        }
    }
}

/// Errors from the device cloud.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceCloudError {
    /// A required setting (token, device id) is missing.
    #[error("device cloud not configured: {0}")]
    NotConfigured(&'static str),

    /// Request did not finish within the client timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Cloud answered with a non-success status.
    #[error("device cloud error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Cloud returned an error object for the device.
    #[error("device error: {0}")]
    Device(String),
}

impl DeviceCloudError {
    pub fn network(message: impl Into<String>) -> Self {
        DeviceCloudError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        DeviceCloudError::Parse(message.into())
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        DeviceCloudError::Http {
            status,
            body: body.into(),
        }
    }
}
