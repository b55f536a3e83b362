//! PostgreSQL implementation of DoorStateStore.
//!
//! The table name comes from configuration, so queries are built at runtime
//! with the identifier quoted; values are always bound.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::config::is_sql_identifier;
use crate::domain::door::{DoorState, DoorStatus};
use crate::domain::foundation::{DeviceId, Timestamp};
use crate::ports::{DoorStateStore, StoreError};

use super::table::TableName;

/// PostgreSQL implementation of DoorStateStore.
#[derive(Clone)]
pub struct PostgresDoorStateStore {
    pool: PgPool,
    table: TableName,
}

impl PostgresDoorStateStore {
    /// Creates a new PostgresDoorStateStore.
    pub fn new(pool: PgPool, table: impl AsRef<str>) -> Self {
        Self {
            pool,
            table: TableName::new(table),
        }
    }

    /// Quoted table identifier.
    fn table(&self) -> Result<String, StoreError> {
        let name = self.table.get()?;
        if !is_sql_identifier(name) {
            return Err(StoreError::Backend(format!("Invalid table name: {}", name)));
        }
        Ok(format!("\"{}\"", name))
    }

    /// Creates the table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let table = self.table()?;
        sqlx::query(&create_table_sql(&table))
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to create table: {}", e)))?;
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            device_id TEXT PRIMARY KEY,
            status TEXT NOT NULL,
            last_checked BIGINT NOT NULL DEFAULT 0,
            last_opened_time BIGINT NOT NULL DEFAULT 0,
            last_closed_time BIGINT NOT NULL DEFAULT 0,
            last_button_press BIGINT NOT NULL DEFAULT 0,
            notification_sent BOOLEAN NOT NULL DEFAULT FALSE,
            duration_open_mins BIGINT NOT NULL DEFAULT 0
        )
        "#
    )
}

fn upsert_sql(table: &str) -> String {
    format!(
        r#"
        INSERT INTO {table} (
            device_id, status, last_checked, last_opened_time, last_closed_time,
            last_button_press, notification_sent, duration_open_mins
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (device_id) DO UPDATE SET
            status = EXCLUDED.status,
            last_checked = EXCLUDED.last_checked,
            last_opened_time = EXCLUDED.last_opened_time,
            last_closed_time = EXCLUDED.last_closed_time,
            last_button_press = EXCLUDED.last_button_press,
            notification_sent = EXCLUDED.notification_sent,
            duration_open_mins = EXCLUDED.duration_open_mins
        "#
    )
}

#[async_trait]
impl DoorStateStore for PostgresDoorStateStore {
    async fn get(&self, device_id: &DeviceId) -> Result<Option<DoorState>, StoreError> {
        let table = self.table()?;
        let row = sqlx::query(&format!(
            r#"
            SELECT device_id, status, last_checked, last_opened_time, last_closed_time,
                   last_button_press, notification_sent, duration_open_mins
            FROM {table}
            WHERE device_id = $1
            "#
        ))
        .bind(device_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(format!("Failed to fetch door state: {}", e)))?;

        row.map(row_to_door_state).transpose()
    }

    async fn put(&self, state: &DoorState) -> Result<(), StoreError> {
        let table = self.table()?;
        sqlx::query(&upsert_sql(&table))
            .bind(state.device_id.as_str())
            .bind(state.status.as_str())
            .bind(state.last_checked.as_unix_secs())
            .bind(state.last_opened_time.as_unix_secs())
            .bind(state.last_closed_time.as_unix_secs())
            .bind(state.last_button_press.as_unix_secs())
            .bind(state.notification_sent)
            .bind(state.duration_open_mins)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to save door state: {}", e)))?;

        Ok(())
    }
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::Deserialization(format!("Failed to get {}: {}", name, e)))
}

fn row_to_door_state(row: sqlx::postgres::PgRow) -> Result<DoorState, StoreError> {
    let device_id: String = column(&row, "device_id")?;
    let status: String = column(&row, "status")?;

    Ok(DoorState {
        device_id: DeviceId::new(device_id)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?,
        status: DoorStatus::parse(&status),
        last_checked: Timestamp::from_unix_secs(column(&row, "last_checked")?),
        last_opened_time: Timestamp::from_unix_secs(column(&row, "last_opened_time")?),
        last_closed_time: Timestamp::from_unix_secs(column(&row, "last_closed_time")?),
        last_button_press: Timestamp::from_unix_secs(column(&row, "last_button_press")?),
        notification_sent: column(&row, "notification_sent")?,
        duration_open_mins: column(&row, "duration_open_mins")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_targets_quoted_table() {
        let sql = upsert_sql("\"GarageDoorState\"");
        assert!(sql.contains("INSERT INTO \"GarageDoorState\""));
        assert!(sql.contains("ON CONFLICT (device_id) DO UPDATE"));
    }

    #[test]
    fn create_table_has_all_columns() {
        let sql = create_table_sql("\"doors\"");
        for col in [
            "device_id",
            "status",
            "last_checked",
            "last_opened_time",
            "last_closed_time",
            "last_button_press",
            "notification_sent",
            "duration_open_mins",
        ] {
            assert!(sql.contains(col), "missing column {}", col);
        }
    }
}
