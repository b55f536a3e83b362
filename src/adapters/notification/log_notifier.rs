//! Notifier that only writes the alert to the log.

use async_trait::async_trait;

use crate::ports::{Notifier, NotifierError};

use super::payload::require_topic;

#[derive(Debug, Clone)]
pub struct LogNotifier {
    topic: String,
}

impl LogNotifier {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        let topic = require_topic(&self.topic)?;
        tracing::warn!(topic, subject, body, "Door alert");
        Ok(())
    }
}
