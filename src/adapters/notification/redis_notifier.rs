//! Redis pub/sub notifier.
//!
//! Publishes a JSON [`NotificationPayload`] on the channel named by the topic.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{Notifier, NotifierError};

use super::payload::{require_topic, NotificationPayload};

#[derive(Clone)]
pub struct RedisNotifier {
    conn: MultiplexedConnection,
    topic: String,
}

impl RedisNotifier {
    pub fn new(conn: MultiplexedConnection, topic: impl Into<String>) -> Self {
        Self {
            conn,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        let topic = require_topic(&self.topic)?;
        let json = NotificationPayload::new(topic, subject, body).to_json()?;

        let mut conn = self.conn.clone();
        let receivers: i64 = conn
            .publish(topic, json)
            .await
            .map_err(|e: redis::RedisError| NotifierError::Delivery(e.to_string()))?;

        tracing::debug!(topic, receivers, "Published door alert");
        Ok(())
    }
}
