//! Door module - sensor status, the persisted door record, and the
//! reconciliation that turns a sensor reading into the next record.

mod alert;
mod button;
mod duration;
mod reconcile;
mod state;
mod status;

pub use alert::DoorAlert;
pub use button::ButtonPressOutcome;
pub use duration::{open_duration_minutes, phrase_duration};
pub use reconcile::{reconcile, Reconciliation};
pub use state::DoorState;
pub use status::DoorStatus;
