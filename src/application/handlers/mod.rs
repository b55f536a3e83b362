//! Command handlers.

pub mod door;

pub use door::{
    speech, DoorMonitor, DoorStateRecorder, MonitorError, MonitorReport, NotificationOutcome,
    VoiceCommandHandler,
};
