//! Door state store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Door state store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Table name; namespaces records in every backend
    pub table: Option<String>,

    /// Which store adapter to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Redis connection URL for the redis backend
    pub redis_url: Option<String>,

    /// PostgreSQL connection URL for the postgres backend
    pub database_url: Option<String>,

    /// Deadline for each store call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Store adapter selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Redis,
    Postgres,
}

impl StorageConfig {
    /// Configured table name, `None` when unset or blank
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Deadline for each store call
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        match self.backend {
            StorageBackend::Memory | StorageBackend::File => {}
            StorageBackend::Redis => {
                let url = self
                    .redis_url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("STORAGE__REDIS_URL"))?;
                if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                    return Err(ValidationError::InvalidRedisUrl);
                }
            }
            StorageBackend::Postgres => {
                let url = self
                    .database_url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("STORAGE__DATABASE_URL"))?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
                // The table name is interpolated into SQL, so it must be a plain identifier.
                if let Some(table) = self.table_name() {
                    if !is_sql_identifier(table) {
                        return Err(ValidationError::InvalidTableName);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table: None,
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            redis_url: None,
            database_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// True for `[A-Za-z][A-Za-z0-9_]*` up to 63 characters.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_timeout() -> u64 {
    5
}
