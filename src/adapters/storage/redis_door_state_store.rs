//! Redis-backed door state store.
//!
//! Each record is a JSON string under `<table>:<device>`, so several
//! deployments can share one Redis instance.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::door::DoorState;
use crate::domain::foundation::DeviceId;
use crate::ports::{DoorStateStore, StoreError};

use super::table::TableName;

#[derive(Clone)]
pub struct RedisDoorStateStore {
    conn: MultiplexedConnection,
    table: TableName,
}

impl RedisDoorStateStore {
    pub fn new(conn: MultiplexedConnection, table: impl AsRef<str>) -> Self {
        Self {
            conn,
            table: TableName::new(table),
        }
    }

    fn key(&self, device_id: &DeviceId) -> Result<String, StoreError> {
        Ok(record_key(self.table.get()?, device_id))
    }
}

fn record_key(table: &str, device_id: &DeviceId) -> String {
    format!("{}:{}", table, device_id)
}

#[async_trait]
impl DoorStateStore for RedisDoorStateStore {
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
        let key = self.key(device_id)?;
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e: redis::RedisError| StoreError::Backend(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| StoreError::Deserialization(e.to_string()))
        })
        .transpose()
    }

    async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
        let key = self.key(&state.device_id)?;
        let json =
            serde_json::to_string(state).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, json)
            .await
            .map_err(|e: redis::RedisError| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced_by_table() {
        let device = DeviceId::new("e00fce68").unwrap();
        assert_eq!(record_key("GarageDoorState", &device), "GarageDoorState:e00fce68");
    }
}
