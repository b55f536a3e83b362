//! DoorMonitor - one poll cycle of the open-door watcher.
//!
//! Read the sensor, reconcile against the stored record, send the alert if
//! due, then persist. A failed sensor read aborts the cycle before anything
//! is written. A failed alert leaves `notificationSent` false so the next
//! cycle tries again.

use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::domain::door::{DoorAlert, DoorStatus};
use crate::domain::foundation::{PollCycleId, Timestamp};
use crate::ports::{DeviceCloud, DeviceCloudError, Notifier, StoreError, DOOR_STATUS_VARIABLE};

use super::DoorStateRecorder;

/// Whether the open-door alert went out this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationOutcome {
    NotDue,
    Sent,
    Failed,
}

/// Summary of a completed poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorReport {
    #[serde(rename = "doorStatus")]
    pub status: DoorStatus,
    pub previous_status: DoorStatus,
    pub transitioned: bool,
    pub duration_minutes: i64,
    pub notification: NotificationOutcome,
}

/// Reasons a poll cycle did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    #[error("failed to read door status: {0}")]
    StatusRead(#[source] DeviceCloudError),

    #[error("failed to persist door state: {0}")]
    StatePersist(#[source] StoreError),
}

pub struct DoorMonitor {
    device_cloud: Arc<dyn DeviceCloud>,
    notifier: Arc<dyn Notifier>,
    recorder: DoorStateRecorder,
}

impl DoorMonitor {
    pub fn new(
        device_cloud: Arc<dyn DeviceCloud>,
        notifier: Arc<dyn Notifier>,
        recorder: DoorStateRecorder,
    ) -> Self {
        Self {
            device_cloud,
            notifier,
            recorder,
        }
    }

    pub async fn poll(&self) -> Result<MonitorReport, MonitorError> {
        self.poll_at(Timestamp::now()).await
    }

    /// Runs one cycle as if triggered at `now`.
    pub async fn poll_at(&self, now: Timestamp) -> Result<MonitorReport, MonitorError> {
        let span = tracing::info_span!("poll_cycle", cycle_id = %PollCycleId::new());
        self.run_cycle(now).instrument(span).await
    }

    async fn run_cycle(&self, now: Timestamp) -> Result<MonitorReport, MonitorError> {
        let raw = self
            .device_cloud
            .read_variable(DOOR_STATUS_VARIABLE)
            .await
            .map_err(MonitorError::StatusRead)?;
        let observed = DoorStatus::parse(&raw);
        tracing::debug!(status = %observed, "Current door status");

        let mut reconciliation = self
            .recorder
            .reconcile(observed, now)
            .await
            .map_err(MonitorError::StatePersist)?;

        let notification = if reconciliation.should_notify {
            let alert = DoorAlert::open_too_long(reconciliation.duration_minutes, now);
            match self.notifier.publish(&alert.subject, &alert.body).await {
                Ok(()) => {
                    tracing::info!(
                        duration_minutes = reconciliation.duration_minutes,
                        "Open-door alert sent"
                    );
                    reconciliation.mark_notified();
                    NotificationOutcome::Sent
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to send open-door alert");
                    NotificationOutcome::Failed
                }
            }
        } else {
            NotificationOutcome::NotDue
        };

        self.recorder
            .save(&reconciliation.next)
            .await
            .map_err(MonitorError::StatePersist)?;

        if reconciliation.next.status.is_open() {
            tracing::info!(
                duration_minutes = reconciliation.duration_minutes,
                threshold_minutes = self.recorder.threshold_minutes(),
                "Door is open"
            );
        }

        Ok(MonitorReport {
            status: reconciliation.next.status,
            previous_status: reconciliation.previous_status,
            transitioned: reconciliation.transitioned,
            duration_minutes: reconciliation.duration_minutes,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notification::InMemoryNotifier;
    use crate::adapters::particle::MockDeviceCloud;
    use crate::adapters::storage::InMemoryDoorStateStore;
    use crate::domain::door::DoorState;
    use crate::domain::foundation::DeviceId;
    use crate::ports::DoorStateStore;
    use async_trait::async_trait;

    const T: i64 = 1_700_000_000;

    fn device() -> DeviceId {
        DeviceId::new("dev-1").unwrap()
    }

    struct Fixture {
        cloud: MockDeviceCloud,
        notifier: InMemoryNotifier,
        store: InMemoryDoorStateStore,
        monitor: DoorMonitor,
    }

    fn fixture() -> Fixture {
        let cloud = MockDeviceCloud::new();
        let notifier = InMemoryNotifier::new();
        let store = InMemoryDoorStateStore::new("doors");
        let monitor = DoorMonitor::new(
            Arc::new(cloud.clone()),
            Arc::new(notifier.clone()),
            DoorStateRecorder::new(Arc::new(store.clone()), Some(device()), 120),
        );
        Fixture {
            cloud,
            notifier,
            store,
            monitor,
        }
    }

    async fn seed_open(store: &InMemoryDoorStateStore, opened: i64, notified: bool) {
        let mut state = DoorState::new(device());
        state.status = DoorStatus::Open;
        state.last_opened_time = Timestamp::from_unix_secs(opened);
        state.notification_sent = notified;
        store.put(&state).await.unwrap();
    }

    #[tokio::test]
    async fn first_open_observation_is_recorded_without_alert() {
        let f = fixture();
        f.cloud.set_door_status("open");

        let report = f.monitor.poll_at(Timestamp::from_unix_secs(T)).await.unwrap();

        assert_eq!(report.status, DoorStatus::Open);
        assert_eq!(report.previous_status, DoorStatus::Unknown);
        assert!(report.transitioned);
        assert_eq!(report.duration_minutes, 0);
        assert_eq!(report.notification, NotificationOutcome::NotDue);

        let saved = f.store.get(&device()).await.unwrap().unwrap();
        assert_eq!(saved.last_opened_time, Timestamp::from_unix_secs(T));
    }

    #[tokio::test]
    async fn alert_fires_once_past_threshold() {
        let f = fixture();
        f.cloud.set_door_status("open");
        seed_open(&f.store, T, false).await;

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 7260))
            .await
            .unwrap();
        assert_eq!(report.duration_minutes, 121);
        assert_eq!(report.notification, NotificationOutcome::Sent);

        let sent = f.notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Garage Door Open Alert - 121 mins");
        assert!(sent[0].body.contains("2 hours and 1 minutes"));

        let saved = f.store.get(&device()).await.unwrap().unwrap();
        assert!(saved.notification_sent);
        assert_eq!(saved.duration_open_mins, 121);

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 7560))
            .await
            .unwrap();
        assert_eq!(report.notification, NotificationOutcome::NotDue);
        assert_eq!(f.notifier.sent_count().await, 1);
    }

    #[tokio::test]
    async fn zero_threshold_alerts_on_first_open_poll() {
        let cloud = MockDeviceCloud::new();
        cloud.set_door_status("open");
        let notifier = InMemoryNotifier::new();
        let monitor = DoorMonitor::new(
            Arc::new(cloud),
            Arc::new(notifier.clone()),
            DoorStateRecorder::new(
                Arc::new(InMemoryDoorStateStore::new("doors")),
                Some(device()),
                0,
            ),
        );

        let report = monitor.poll_at(Timestamp::from_unix_secs(T)).await.unwrap();
        assert_eq!(report.notification, NotificationOutcome::Sent);

        let sent = notifier.sent().await;
        assert_eq!(sent[0].subject, "Garage Door Open Alert - 0 mins");
        assert!(sent[0].body.contains("open for 0 minutes."));
    }

    #[tokio::test]
    async fn already_notified_session_stays_quiet() {
        let f = fixture();
        f.cloud.set_door_status("open");
        seed_open(&f.store, T, true).await;

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 7260))
            .await
            .unwrap();

        assert_eq!(report.notification, NotificationOutcome::NotDue);
        assert_eq!(f.notifier.sent_count().await, 0);
    }

    #[tokio::test]
    async fn failed_alert_is_retried_next_cycle() {
        let f = fixture();
        f.cloud.set_door_status("open");
        seed_open(&f.store, T, false).await;
        f.notifier.set_failing(true);

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 7260))
            .await
            .unwrap();
        assert_eq!(report.notification, NotificationOutcome::Failed);
        let saved = f.store.get(&device()).await.unwrap().unwrap();
        assert!(!saved.notification_sent);

        f.notifier.set_failing(false);
        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 7560))
            .await
            .unwrap();
        assert_eq!(report.notification, NotificationOutcome::Sent);
    }

    #[tokio::test]
    async fn closing_resets_the_session() {
        let f = fixture();
        seed_open(&f.store, T, true).await;
        f.cloud.set_door_status("closed");

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 9000))
            .await
            .unwrap();

        assert!(report.transitioned);
        let saved = f.store.get(&device()).await.unwrap().unwrap();
        assert_eq!(saved.status, DoorStatus::Closed);
        assert!(!saved.notification_sent);
        assert_eq!(saved.last_closed_time, Timestamp::from_unix_secs(T + 9000));
        assert_eq!(saved.duration_open_mins, 0);
    }

    #[tokio::test]
    async fn status_read_failure_writes_nothing() {
        let store = InMemoryDoorStateStore::new("doors");
        let monitor = DoorMonitor::new(
            Arc::new(
                MockDeviceCloud::new()
                    .with_variable_error(DeviceCloudError::Timeout { timeout_secs: 10 }),
            ),
            Arc::new(InMemoryNotifier::new()),
            DoorStateRecorder::new(Arc::new(store.clone()), Some(device()), 120),
        );

        let err = monitor.poll().await.unwrap_err();

        assert!(matches!(err, MonitorError::StatusRead(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_reading_passes_through_without_timestamps() {
        let f = fixture();
        seed_open(&f.store, T, false).await;
        f.cloud.set_door_status("distance=42");

        let report = f
            .monitor
            .poll_at(Timestamp::from_unix_secs(T + 60))
            .await
            .unwrap();

        assert_eq!(report.status.as_str(), "distance=42");
        let saved = f.store.get(&device()).await.unwrap().unwrap();
        assert_eq!(saved.last_opened_time, Timestamp::from_unix_secs(T));
        assert!(!saved.last_closed_time.is_set());
    }

    struct BrokenStore;

    #[async_trait]
    impl DoorStateStore for BrokenStore {
        async fn get(&self, _device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
            Err(StoreError::Backend("down".to_string()))
        }

        async fn put(&self, _state: &DoorState) -> Result<(), StoreError> {
            Err(StoreError::Backend("down".to_string()))
        }
    }

    #[tokio::test]
    async fn persist_failure_fails_the_cycle() {
        let monitor = DoorMonitor::new(
            Arc::new(MockDeviceCloud::new()),
            Arc::new(InMemoryNotifier::new()),
            DoorStateRecorder::new(Arc::new(BrokenStore), Some(device()), 120),
        );

        let err = monitor.poll().await.unwrap_err();
        assert_eq!(
            err,
            MonitorError::StatePersist(StoreError::Backend("down".to_string()))
        );
    }
}
