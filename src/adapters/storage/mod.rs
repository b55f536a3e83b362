//! Storage Adapters
//!
//! Implementations of the DoorStateStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryDoorStateStore** - process memory (testing/development)
//! - **FileDoorStateStore** - one YAML file per device
//! - **RedisDoorStateStore** - JSON string per device
//! - **PostgresDoorStateStore** - one row per device
//! - **TimedDoorStateStore** - deadline wrapper around any of the above
//!
//! Every adapter is namespaced by the configured table name.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDoorStateStore, InMemoryDoorStateStore};
//!
//! let store = FileDoorStateStore::new("./data", "GarageDoorState");
//! let store = InMemoryDoorStateStore::new("GarageDoorState");
//! ```

mod file_door_state_store;
mod in_memory_door_state_store;
mod postgres_door_state_store;
mod redis_door_state_store;
mod table;
mod timed_door_state_store;

pub use file_door_state_store::FileDoorStateStore;
pub use in_memory_door_state_store::InMemoryDoorStateStore;
pub use postgres_door_state_store::PostgresDoorStateStore;
pub use redis_door_state_store::RedisDoorStateStore;
pub use timed_door_state_store::TimedDoorStateStore;
