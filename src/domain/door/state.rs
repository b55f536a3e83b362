//! DoorState - the single persisted record per device.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, Timestamp};

use super::DoorStatus;

/// Last known state of one garage door.
///
/// Writes are full-record overwrites, so every mutation is a
/// read-modify-write by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorState {
    pub device_id: DeviceId,
    #[serde(default)]
    pub status: DoorStatus,
    #[serde(default)]
    pub last_checked: Timestamp,
    #[serde(default)]
    pub last_opened_time: Timestamp,
    #[serde(default)]
    pub last_closed_time: Timestamp,
    #[serde(default)]
    pub last_button_press: Timestamp,
    /// Whether the open-door alert already fired for the current open session.
    #[serde(default)]
    pub notification_sent: bool,
    /// Minutes open as of `last_checked`; 0 unless open.
    #[serde(default)]
    pub duration_open_mins: i64,
}

impl DoorState {
    /// Fresh record for a device never seen before: status unknown, no timestamps.
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            status: DoorStatus::Unknown,
            last_checked: Timestamp::UNSET,
            last_opened_time: Timestamp::UNSET,
            last_closed_time: Timestamp::UNSET,
            last_button_press: Timestamp::UNSET,
            notification_sent: false,
            duration_open_mins: 0,
        }
    }

    /// Records an actuator trigger.
    pub fn record_button_press(&mut self, now: Timestamp) {
        self.last_button_press = now;
        self.last_checked = now;
    }
}
