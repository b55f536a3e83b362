//! File-based Door State Store
//!
//! Stores one YAML file per device at `<base>/<table>/<device>.yaml`.
//! Device ids are percent-encoded into file names, so distinct ids never
//! share a file and none can escape the table directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::door::DoorState;
use crate::domain::foundation::DeviceId;
use crate::ports::{DoorStateStore, StoreError};

use super::table::TableName;

/// File-based storage for door state
#[derive(Debug, Clone)]
pub struct FileDoorStateStore {
    base_path: PathBuf,
    table: TableName,
}

impl FileDoorStateStore {
    /// Create a new file store
    ///
    /// # Example
    /// ```ignore
    /// let store = FileDoorStateStore::new("./data", "GarageDoorState");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, table: impl AsRef<str>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            table: TableName::new(table),
        }
    }

    fn table_dir(&self) -> Result<PathBuf, StoreError> {
        Ok(self.base_path.join(self.table.get()?))
    }

    fn state_file_path(&self, device_id: &DeviceId) -> Result<PathBuf, StoreError> {
        let file_name = encode_file_name(device_id.as_str());
        Ok(self.table_dir()?.join(format!("{}.yaml", file_name)))
    }
}

/// Keeps `[A-Za-z0-9_-]` and writes every other byte as `%XX`.
fn encode_file_name(id: &str) -> String {
    let mut encoded = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[async_trait]
impl DoorStateStore for FileDoorStateStore {
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
        let file_path = self.state_file_path(device_id)?;

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let state = serde_yaml::from_str(&yaml)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;

        Ok(Some(state))
    }

    async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
        let dir = self.table_dir()?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let yaml =
            serde_yaml::to_string(state).map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write then rename so readers never see a half-written record
        let file_path = self.state_file_path(&state.device_id)?;
        let tmp_path = file_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}
