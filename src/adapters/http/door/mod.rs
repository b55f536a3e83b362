//! HTTP adapter for the voice webhook and monitor trigger.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, MonitorRunResponse};
pub use handlers::DoorAppState;
pub use routes::door_router;
