//! Notification configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Topic every alert is published to
    pub topic: Option<String>,

    /// Which notifier adapter to use
    #[serde(default)]
    pub backend: NotificationBackend,

    /// Redis connection URL for the redis backend
    pub redis_url: Option<String>,

    /// Endpoint for the webhook backend
    pub webhook_url: Option<String>,

    /// Optional HMAC-SHA256 key for signing webhook bodies
    pub signing_secret: Option<String>,

    /// Deadline for each publish, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Notifier adapter selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationBackend {
    /// Write alerts to the log only
    #[default]
    Log,
    Redis,
    Webhook,
}

impl NotificationConfig {
    /// Configured topic, `None` when unset or blank
    pub fn topic_name(&self) -> Option<&str> {
        self.topic.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Deadline for each publish
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        match self.backend {
            NotificationBackend::Log => {}
            NotificationBackend::Redis => {
                let url = self
                    .redis_url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("NOTIFICATION__REDIS_URL"))?;
                if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                    return Err(ValidationError::InvalidRedisUrl);
                }
            }
            NotificationBackend::Webhook => {
                let url = self
                    .webhook_url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("NOTIFICATION__WEBHOOK_URL"))?;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidUrl("notification.webhook_url"));
                }
            }
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            topic: None,
            backend: NotificationBackend::default(),
            redis_url: None,
            webhook_url: None,
            signing_secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let config = NotificationConfig::default();
        assert_eq!(config.backend, NotificationBackend::Log);
        assert!(config.topic_name().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_webhook_requires_http_url() {
        let config = NotificationConfig {
            backend: NotificationBackend::Webhook,
            webhook_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("notification.webhook_url"))
        );
    }

    #[test]
    fn test_redis_requires_url() {
        let config = NotificationConfig {
            backend: NotificationBackend::Redis,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
