//! TimedDoorStateStore - puts a deadline on every store call.
//!
//! Wraps any `DoorStateStore`. Redis and PostgreSQL calls have no deadline of
//! their own, so bootstrap wraps every configured backend in one of these.
//! An expired call is reported as `StoreError::Backend`; the inner future is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::domain::door::DoorState;
use crate::domain::foundation::DeviceId;
use crate::ports::{DoorStateStore, StoreError};

pub struct TimedDoorStateStore {
    inner: Arc<dyn DoorStateStore>,
    timeout: Duration,
}

impl TimedDoorStateStore {
    pub fn new(inner: Arc<dyn DoorStateStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    fn expired(&self, operation: &str) -> StoreError {
        StoreError::Backend(format!(
            "{} timed out after {}ms",
            operation,
            self.timeout.as_millis()
        ))
    }
}

#[async_trait]
impl DoorStateStore for TimedDoorStateStore {
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
        time::timeout(self.timeout, self.inner.get(device_id))
            .await
            .map_err(|_| self.expired("get"))?
    }

    async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
        time::timeout(self.timeout, self.inner.put(state))
            .await
            .map_err(|_| self.expired("put"))?
    }
}
