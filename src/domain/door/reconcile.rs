//! Door state reconciliation.
//!
//! Given the last persisted record and a fresh sensor reading, decide whether
//! a transition happened, update timestamps, and decide whether the open-door
//! alert is due. The alert fires at most once per open session: the flag is
//! cleared on every transition into `open` or `closed` and only set by the
//! caller after a successful dispatch.

use crate::domain::foundation::{DeviceId, Timestamp};

use super::{open_duration_minutes, DoorState, DoorStatus};

/// Outcome of reconciling one observation against the previous record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Record to persist.
    pub next: DoorState,
    /// Status held by the previous record (or the synthesized default).
    pub previous_status: DoorStatus,
    /// True if the observed status differs from the previous one.
    pub transitioned: bool,
    /// Minutes open as of the observation; 0 unless open.
    pub duration_minutes: i64,
    /// True if the caller should dispatch the open-door alert now.
    pub should_notify: bool,
}

impl Reconciliation {
    /// Records that the alert went out. Call only after dispatch succeeded.
    ///
    /// No-op if no alert was due, so the flag can never be set while the
    /// door is not open or before the threshold.
    pub fn mark_notified(&mut self) {
        if self.should_notify {
            self.next.notification_sent = true;
        }
    }
}

/// Reconciles `observed` at time `now` against `previous`.
///
/// A missing previous record is treated as a fresh one with unknown status.
/// Transitions into `moving` or any unrecognised status update no timestamp
/// and leave the notification flag alone.
pub fn reconcile(
    device_id: &DeviceId,
    previous: Option<DoorState>,
    observed: DoorStatus,
    now: Timestamp,
    threshold_minutes: i64,
) -> Reconciliation {
    let previous = previous.unwrap_or_else(|| DoorState::new(device_id.clone()));
    let previous_status = previous.status.clone();

    let mut next = previous;
    next.last_checked = now;
    next.status = observed;

    let transitioned = next.status != previous_status;
    if transitioned {
        match next.status {
            DoorStatus::Open => {
                next.last_opened_time = now;
                next.notification_sent = false;
            }
            DoorStatus::Closed => {
                next.last_closed_time = now;
                next.notification_sent = false;
            }
            _ => {}
        }
    }

    let duration_minutes = open_duration_minutes(&next, now);
    next.duration_open_mins = duration_minutes;

    let should_notify = next.status.is_open()
        && duration_minutes >= threshold_minutes
        && !next.notification_sent;

    Reconciliation {
        next,
        previous_status,
        transitioned,
        duration_minutes,
        should_notify,
    }
}
