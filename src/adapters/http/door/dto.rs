//! Response bodies for the door endpoints.

use serde::{Deserialize, Serialize};

use crate::application::MonitorReport;

/// Body of a successful `POST /monitor/run`.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorRunResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: MonitorReport,
}

impl From<MonitorReport> for MonitorRunResponse {
    fn from(report: MonitorReport) -> Self {
        Self {
            status: "ok",
            report,
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
