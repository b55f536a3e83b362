//! Notifier port - Interface for dispatching alerts to a fixed topic.
//!
//! The topic is adapter configuration; callers only provide a subject and
//! body. A failed publish is reported to the caller and never retried inside
//! the adapter.

use async_trait::async_trait;

/// Errors from notification dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifierError {
    #[error("notifier not configured: {0}")]
    NotConfigured(&'static str),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("notification rejected with status {status}")]
    Rejected { status: u16 },
}

/// Port for publishing notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish one message to the configured topic.
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifierError>;
}
