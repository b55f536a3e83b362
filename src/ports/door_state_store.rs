//! Door State Store Port - Interface for persisting door records.
//!
//! One record per device id. `put` overwrites the whole record; there is no
//! partial update, so callers read, modify and write. Concurrent writers are
//! not coordinated and the last write wins.

use async_trait::async_trait;

use crate::domain::door::DoorState;
use crate::domain::foundation::DeviceId;

/// Errors that can occur during door state storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("State store not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Failed to serialize state: {0}")]
    Serialization(String),

    #[error("Failed to deserialize state: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Port for loading and saving door state records
#[async_trait]
pub trait DoorStateStore: Send + Sync {
    /// Load the record for a device
    ///
    /// # Returns
    /// `None` if the device has never been recorded
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError>;

    /// Overwrite the record keyed by `state.device_id`
    async fn put(&self, state: &DoorState) -> Result<(), StoreError>;
}
