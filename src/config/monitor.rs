//! Door monitor configuration

use serde::{Deserialize, Deserializer};
use std::time::Duration;

use super::error::ValidationError;

/// Threshold used when none is configured or the value does not parse.
pub const DEFAULT_THRESHOLD_MINUTES: i64 = 120;

/// Door monitor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Minutes the door may stay open before one alert is sent
    #[serde(
        default = "default_threshold",
        deserialize_with = "lenient_threshold"
    )]
    pub threshold_minutes: i64,

    /// Whether the binary runs the scheduled poller
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between scheduled polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl MonitorConfig {
    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate monitor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(10..=86_400).contains(&self.poll_interval_secs) {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_minutes: default_threshold(),
            enabled: default_enabled(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_threshold() -> i64 {
    DEFAULT_THRESHOLD_MINUTES
}

fn default_enabled() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    300
}

/// Accepts an integer or a numeric string; anything else falls back to the default.
fn lenient_threshold<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    let parsed = match Raw::deserialize(deserializer) {
        Ok(Raw::Number(n)) => Some(n),
        Ok(Raw::Text(s)) => s.trim().parse::<i64>().ok(),
        Err(_) => None,
    };
    Ok(parsed.unwrap_or(DEFAULT_THRESHOLD_MINUTES))
}
