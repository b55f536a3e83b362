//! In-Memory Door State Store
//!
//! Keeps records in process memory. Used by tests and the `memory` backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::door::DoorState;
use crate::domain::foundation::DeviceId;
use crate::ports::{DoorStateStore, StoreError};

use super::table::TableName;

/// In-memory storage for door state, keyed by `(table, device)`.
#[derive(Debug, Clone)]
pub struct InMemoryDoorStateStore {
    table: TableName,
    states: Arc<RwLock<HashMap<(String, DeviceId), DoorState>>>,
}

impl InMemoryDoorStateStore {
    /// Create a store using the given table name
    pub fn new(table: impl AsRef<str>) -> Self {
        Self {
            table: TableName::new(table),
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of stored records (useful for tests)
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl DoorStateStore for InMemoryDoorStateStore {
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
        let table = self.table.get()?;
        let states = self.states.read().await;
        Ok(states.get(&(table.to_string(), device_id.clone())).cloned())
    }

    async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
        let table = self.table.get()?;
        let mut states = self.states.write().await;
        states.insert((table.to_string(), state.device_id.clone()), state.clone());
        Ok(())
    }
}
