//! Adapters - implementations of the ports plus the inbound HTTP surface.
//!
//! - `particle` - device cloud (Particle REST API, mock)
//! - `storage` - door state stores (memory, file, Redis, PostgreSQL)
//! - `notification` - alert delivery (log, Redis, webhook, in-memory)
//! - `http` - axum routes
//! - `scheduler` - background monitor loop

pub mod http;
pub mod notification;
pub mod particle;
pub mod scheduler;
pub mod storage;

pub use http::{app_router, DoorAppState};
pub use notification::{
    InMemoryNotifier, LogNotifier, RedisNotifier, TimedNotifier, WebhookNotifier,
};
pub use particle::{MockDeviceCloud, ParticleClient, ParticleClientConfig};
pub use scheduler::{MonitorScheduler, MonitorSchedulerConfig};
pub use storage::{
    FileDoorStateStore, InMemoryDoorStateStore, PostgresDoorStateStore, RedisDoorStateStore,
    TimedDoorStateStore,
};
