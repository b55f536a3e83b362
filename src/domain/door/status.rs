//! DoorStatus - what the door sensor last reported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string reported by the door sensor.
///
/// The four known values get their own variants. Anything else the device
/// reports is kept verbatim in `Other` so it survives persistence unchanged.
/// Parsing is exact: `"Open"` is not `"open"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DoorStatus {
    Open,
    Closed,
    Moving,
    #[default]
    Unknown,
    Other(String),
}

impl DoorStatus {
    /// Parses a raw status string from the device.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "open" => DoorStatus::Open,
            "closed" => DoorStatus::Closed,
            "moving" => DoorStatus::Moving,
            "unknown" => DoorStatus::Unknown,
            other => DoorStatus::Other(other.to_string()),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            DoorStatus::Open => "open",
            DoorStatus::Closed => "closed",
            DoorStatus::Moving => "moving",
            DoorStatus::Unknown => "unknown",
            DoorStatus::Other(raw) => raw,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DoorStatus::Open)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DoorStatus::Closed)
    }
}

impl From<String> for DoorStatus {
    fn from(raw: String) -> Self {
        match DoorStatus::parse(&raw) {
            DoorStatus::Other(_) => DoorStatus::Other(raw),
            known => known,
        }
    }
}

impl From<&str> for DoorStatus {
    fn from(raw: &str) -> Self {
        DoorStatus::parse(raw)
    }
}

impl From<DoorStatus> for String {
    fn from(status: DoorStatus) -> Self {
        match status {
            DoorStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
