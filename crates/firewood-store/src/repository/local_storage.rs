//! # Local Storage Repository
//!
//! String keys to string values, last write wins.
//!
//! ```text
//!   ┌──────────────┬───────────────────────────────────┬─────────────────────────┐
//!   │ key          │ value                             │ updated_at              │
//!   ├──────────────┼───────────────────────────────────┼─────────────────────────┤
//!   │ firewoodCart │ [{"name":"Oak Bundle",...}, ...]  │ 2025-03-01T14:05:09Z    │
//!   └──────────────┴───────────────────────────────────┴─────────────────────────┘
//! ```
//!
//! Reads and writes are single statements; nothing here is transactional.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
}

impl LocalStorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        LocalStorageRepository { pool }
    }

    /// Returns the stored value, or `None` if the key was never set.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Local storage read");
        Ok(value)
    }

    /// Inserts or overwrites a value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Local storage write");
        Ok(())
    }

    /// Deletes a key. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reads and deserializes a JSON value.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DbError::Malformed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Serializes and stores a JSON value.
    pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::Malformed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, &raw).await
    }
}
