//! Timestamp value object for points in time at second resolution.
//!
//! Door state records store plain Unix seconds, with `0` meaning the event
//! never happened. `Timestamp` keeps that representation on the wire while
//! giving the domain something better than a bare `i64`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Point in time as Unix seconds, always UTC. `0` is "unset".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The "never happened" marker.
    pub const UNSET: Timestamp = Timestamp(0);

    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Creates a timestamp from Unix seconds.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Creates a timestamp from a DateTime<Utc>, dropping sub-second precision.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0
    }

    /// True once the timestamp records a real event.
    pub fn is_set(&self) -> bool {
        self.0 > 0
    }

    /// Seconds elapsed from `earlier` to `self`; negative if `earlier` is later.
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.0 - earlier.0
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + secs)
    }

    /// Converts to a chrono DateTime, if the value is representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }
}
