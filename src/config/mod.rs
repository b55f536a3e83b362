//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GARAGE_DOOR` prefix and nested values use double underscores as separators.
//!
//! Configuration is read once at startup and handed to each handler
//! explicitly; nothing reads the environment after that.
//!
//! # Example
//!
//! ```no_run
//! use garage_door::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! for setting in config.missing_settings() {
//!     eprintln!("{} not set", setting);
//! }
//! ```

mod error;
mod monitor;
mod notification;
mod particle;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use monitor::{MonitorConfig, DEFAULT_THRESHOLD_MINUTES};
pub use notification::{NotificationBackend, NotificationConfig};
pub use particle::{DeviceCloudBackend, ParticleConfig};
pub use server::{Environment, ServerConfig};
pub use storage::{is_sql_identifier, StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so loading never fails just because a value
/// is absent. Unset required values are reported by
/// [`AppConfig::missing_settings()`] and surface as errors on first use.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Device cloud configuration (base URL, token, device id)
    #[serde(default)]
    pub particle: ParticleConfig,

    /// Door state store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Notification configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Door monitor configuration
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GARAGE_DOOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GARAGE_DOOR__PARTICLE__ACCESS_TOKEN=...` -> `particle.access_token`
    /// - `GARAGE_DOOR__MONITOR__THRESHOLD_MINUTES=90` -> `monitor.threshold_minutes = 90`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GARAGE_DOOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Only structural problems are errors: malformed URLs, zero ports,
    /// out-of-range timeouts, unsafe table names, and backends selected
    /// without their connection URL.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.particle.validate()?;
        self.storage.validate()?;
        self.notification.validate()?;
        self.monitor.validate()?;
        Ok(())
    }

    /// Names of required settings that are unset
    ///
    /// These are warnings, not errors: the service still starts and the
    /// affected operation fails when it is first used.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.particle.has_access_token() {
            missing.push("GARAGE_DOOR__PARTICLE__ACCESS_TOKEN");
        }
        if !self.particle.has_device_id() {
            missing.push("GARAGE_DOOR__PARTICLE__DEVICE_ID");
        }
        if self.storage.table_name().is_none() {
            missing.push("GARAGE_DOOR__STORAGE__TABLE");
        }
        if self.notification.topic_name().is_none() {
            missing.push("GARAGE_DOOR__NOTIFICATION__TOPIC");
        }
        missing
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
