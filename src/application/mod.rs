//! Application layer - handlers that coordinate the ports.
//!
//! The voice command handler and the door monitor run independently and
//! share state only through the door state store.

pub mod handlers;

pub use handlers::{
    DoorMonitor, DoorStateRecorder, MonitorError, MonitorReport, NotificationOutcome,
    VoiceCommandHandler,
};
