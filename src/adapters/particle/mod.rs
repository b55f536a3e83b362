//! Device cloud adapters.
//!
//! - `ParticleClient` - Particle cloud REST API
//! - `MockDeviceCloud` - scripted device for tests and local runs

mod mock_device_cloud;
mod particle_client;

pub use mock_device_cloud::{MockCall, MockDeviceCloud};
pub use particle_client::{ParticleClient, ParticleClientConfig};
