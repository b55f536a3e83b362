//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the garage door domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{DeviceId, PollCycleId};
pub use timestamp::Timestamp;
