//! DoorStateRecorder - read-modify-write of the door record.
//!
//! Shared by the voice command path and the monitor so both apply the same
//! reconciliation. Writes are unconditional overwrites; when both paths run
//! at once the last write wins.

use std::sync::Arc;

use crate::domain::door::{reconcile, DoorState, DoorStatus, Reconciliation};
use crate::domain::foundation::{DeviceId, Timestamp};
use crate::ports::{DoorStateStore, StoreError};

#[derive(Clone)]
pub struct DoorStateRecorder {
    store: Arc<dyn DoorStateStore>,
    device_id: Option<DeviceId>,
    threshold_minutes: i64,
}

impl DoorStateRecorder {
    pub fn new(
        store: Arc<dyn DoorStateStore>,
        device_id: Option<DeviceId>,
        threshold_minutes: i64,
    ) -> Self {
        Self {
            store,
            device_id,
            threshold_minutes,
        }
    }

    pub fn threshold_minutes(&self) -> i64 {
        self.threshold_minutes
    }

    fn device_id(&self) -> Result<&DeviceId, StoreError> {
        self.device_id
            .as_ref()
            .ok_or(StoreError::NotConfigured("device id"))
    }

    /// Loads the stored record. A failed read is logged and treated as no
    /// record so the caller can still persist a best-effort state.
    async fn load_previous(&self, device_id: &DeviceId) -> Option<DoorState> {
        match self.store.get(device_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(device_id = %device_id, error = %e, "Failed to load door state, using default");
                None
            }
        }
    }

    /// Reconciles an observation against the stored record without writing.
    pub async fn reconcile(
        &self,
        observed: DoorStatus,
        now: Timestamp,
    ) -> Result<Reconciliation, StoreError> {
        let device_id = self.device_id()?;
        let previous = self.load_previous(device_id).await;
        let reconciliation = reconcile(device_id, previous, observed, now, self.threshold_minutes);

        if reconciliation.transitioned {
            tracing::info!(
                device_id = %device_id,
                from = %reconciliation.previous_status,
                to = %reconciliation.next.status,
                "Door status changed"
            );
        }
        Ok(reconciliation)
    }

    pub async fn save(&self, state: &DoorState) -> Result<(), StoreError> {
        self.store.put(state).await
    }

    /// Stamps a button press on the stored (or fresh) record.
    pub async fn record_button_press(&self, now: Timestamp) -> Result<DoorState, StoreError> {
        let device_id = self.device_id()?;
        let mut state = self
            .load_previous(device_id)
            .await
            .unwrap_or_else(|| DoorState::new(device_id.clone()));
        state.record_button_press(now);
        self.store.put(&state).await?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDoorStateStore;
    use async_trait::async_trait;

    fn device() -> DeviceId {
        DeviceId::new("dev-1").unwrap()
    }

    struct UnreadableStore {
        inner: InMemoryDoorStateStore,
    }

    #[async_trait]
    impl DoorStateStore for UnreadableStore {
        async fn get(&self, _device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
            Err(StoreError::Backend("read failed".to_string()))
        }

        async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
            self.inner.put(state).await
        }
    }

    #[tokio::test]
    async fn button_press_keeps_other_fields() {
        let store = InMemoryDoorStateStore::new("doors");
        let mut existing = DoorState::new(device());
        existing.status = DoorStatus::Open;
        existing.last_opened_time = Timestamp::from_unix_secs(50);
        store.put(&existing).await.unwrap();

        let recorder = DoorStateRecorder::new(Arc::new(store.clone()), Some(device()), 120);
        recorder
            .record_button_press(Timestamp::from_unix_secs(100))
            .await
            .unwrap();

        let saved = store.get(&device()).await.unwrap().unwrap();
        assert_eq!(saved.status, DoorStatus::Open);
        assert_eq!(saved.last_opened_time, Timestamp::from_unix_secs(50));
        assert_eq!(saved.last_button_press, Timestamp::from_unix_secs(100));
        assert_eq!(saved.last_checked, Timestamp::from_unix_secs(100));
    }

    #[tokio::test]
    async fn unreadable_store_falls_back_to_default() {
        let inner = InMemoryDoorStateStore::new("doors");
        let recorder = DoorStateRecorder::new(
            Arc::new(UnreadableStore {
                inner: inner.clone(),
            }),
            Some(device()),
            120,
        );

        let rec = recorder
            .reconcile(DoorStatus::Open, Timestamp::from_unix_secs(10))
            .await
            .unwrap();
        assert_eq!(rec.previous_status, DoorStatus::Unknown);
        assert!(rec.transitioned);

        let state = recorder
            .record_button_press(Timestamp::from_unix_secs(20))
            .await
            .unwrap();
        assert_eq!(state.status, DoorStatus::Unknown);
        assert_eq!(inner.len().await, 1);
    }

    #[tokio::test]
    async fn missing_device_id_is_not_configured() {
        let recorder =
            DoorStateRecorder::new(Arc::new(InMemoryDoorStateStore::new("doors")), None, 120);

        let err = recorder
            .record_button_press(Timestamp::from_unix_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotConfigured("device id"));
    }
}
