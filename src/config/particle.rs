//! Device cloud (Particle) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Device cloud configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ParticleConfig {
    /// API base URL, including the version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer access token
    pub access_token: Option<String>,

    /// Door controller device id
    pub device_id: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Which device cloud adapter to use
    #[serde(default)]
    pub backend: DeviceCloudBackend,
}

/// Device cloud adapter selection
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCloudBackend {
    #[default]
    Particle,
    /// Scripted in-process device, for local development
    Mock,
}

impl ParticleConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an access token is configured
    pub fn has_access_token(&self) -> bool {
        self.access_token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Check if a device id is configured
    pub fn has_device_id(&self) -> bool {
        self.device_id.as_ref().is_some_and(|d| !d.trim().is_empty())
    }

    /// Validate device cloud configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("particle.base_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            device_id: None,
            timeout_secs: default_timeout(),
            backend: DeviceCloudBackend::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.particle.io/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_config_defaults() {
        let config = ParticleConfig::default();
        assert_eq!(config.base_url, "https://api.particle.io/v1");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.backend, DeviceCloudBackend::Particle);
        assert!(!config.has_access_token());
        assert!(!config.has_device_id());
    }

    #[test]
    fn test_blank_device_id_is_not_configured() {
        let config = ParticleConfig {
            device_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_device_id());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = ParticleConfig {
            base_url: "api.particle.io".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("particle.base_url"))
        );
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = ParticleConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = ParticleConfig {
            access_token: Some("token".to_string()),
            device_id: Some("e00fce68".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
