use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::NotifierError;

/// Message body shared by the Redis and webhook notifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub topic: String,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl NotificationPayload {
    pub fn new(topic: &str, subject: &str, body: &str) -> Self {
        Self {
            topic: topic.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, NotifierError> {
        serde_json::to_string(self)
            .map_err(|e| NotifierError::Delivery(format!("Failed to encode notification: {}", e)))
    }
}

/// Trimmed topic, or `NotConfigured` when blank.
pub fn require_topic(topic: &str) -> Result<&str, NotifierError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(NotifierError::NotConfigured("topic"));
    }
    Ok(topic)
}
