//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DeviceCloud` - function calls and variable reads on the door controller
//! - `DoorStateStore` - one persisted `DoorState` per device
//! - `Notifier` - publish an alert to a fixed topic

mod device_cloud;
mod door_state_store;
mod notifier;

pub use device_cloud::{
    DeviceCloud, DeviceCloudError, FunctionResponse, DOOR_STATUS_VARIABLE, PRESS_BUTTON_FUNCTION,
};
pub use door_state_store::{DoorStateStore, StoreError};
pub use notifier::{Notifier, NotifierError};
