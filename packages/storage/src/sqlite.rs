// ABOUTME: SQLite-backed option store
// ABOUTME: Persists plugin options as JSON values, batch updates run in one transaction

use async_trait::async_trait;
use rstore_core::constants::prefixed;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use tracing::debug;

use crate::{KeyValueStore, OptionChange, OptionValue, StorageError, StorageResult};

const CREATE_OPTIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS options (
        option_name TEXT PRIMARY KEY NOT NULL,
        option_value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
    )
"#;

const UPSERT_OPTION: &str = r#"
    INSERT INTO options (option_name, option_value)
    VALUES (?, ?)
    ON CONFLICT(option_name) DO UPDATE SET
        option_value = excluded.option_value,
        updated_at = datetime('now', 'utc')
"#;

const DELETE_OPTION: &str = "DELETE FROM options WHERE option_name = ?";

pub struct SqliteOptionStore {
    pool: SqlitePool,
}

impl SqliteOptionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`, creating the database and table if needed
    pub async fn open(database_url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Sqlx)?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own database
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    /// Create the options table
    pub async fn init(&self) -> StorageResult<()> {
        sqlx::query(CREATE_OPTIONS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn apply_change(
        tx: &mut Transaction<'_, Sqlite>,
        change: &OptionChange,
    ) -> StorageResult<()> {
        match change {
            OptionChange::Set { key, value } => {
                let encoded = serde_json::to_string(value)?;
                sqlx::query(UPSERT_OPTION)
                    .bind(prefixed(key))
                    .bind(encoded)
                    .execute(&mut **tx)
                    .await
                    .map_err(StorageError::Sqlx)?;
            }
            OptionChange::Delete { key } => {
                sqlx::query(DELETE_OPTION)
                    .bind(prefixed(key))
                    .execute(&mut **tx)
                    .await
                    .map_err(StorageError::Sqlx)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteOptionStore {
    async fn get(&self, key: &str) -> StorageResult<Option<OptionValue>> {
        let row = sqlx::query("SELECT option_value FROM options WHERE option_name = ?")
            .bind(prefixed(key))
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("option_value").map_err(StorageError::Sqlx)?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: OptionValue) -> StorageResult<()> {
        let encoded = serde_json::to_string(&value)?;
        sqlx::query(UPSERT_OPTION)
            .bind(prefixed(key))
            .bind(encoded)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        sqlx::query(DELETE_OPTION)
            .bind(prefixed(key))
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(())
    }

    async fn apply(&self, changes: &[OptionChange]) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        for change in changes {
            Self::apply_change(&mut tx, change).await.map_err(|e| {
                StorageError::Database(format!(
                    "Failed to apply change to option '{}': {}",
                    change.key(),
                    e
                ))
            })?;
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;
        debug!(changes = changes.len(), "Applied option batch");
        Ok(())
    }
}
