//! Door handlers - voice commands and the open-door monitor.

mod door_monitor;
mod door_state_recorder;
mod voice_command;

pub use door_monitor::{DoorMonitor, MonitorError, MonitorReport, NotificationOutcome};
pub use door_state_recorder::DoorStateRecorder;
pub use voice_command::{speech, VoiceCommandHandler};
