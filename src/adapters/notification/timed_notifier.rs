//! Deadline wrapper for any Notifier.
//!
//! An expired publish is a `Delivery` failure, so the monitor leaves the
//! session un-notified and tries again next cycle.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::ports::{Notifier, NotifierError};

pub struct TimedNotifier {
    inner: Arc<dyn Notifier>,
    timeout: Duration,
}

impl TimedNotifier {
    pub fn new(inner: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl Notifier for TimedNotifier {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        time::timeout(self.timeout, self.inner.publish(subject, body))
            .await
            .map_err(|_| {
                NotifierError::Delivery(format!(
                    "publish timed out after {}ms",
                    self.timeout.as_millis()
                ))
            })?
    }
}
