// ABOUTME: Key/value option storage for the settings panel
// ABOUTME: Store capability, option values, errors and the in-memory and SQLite stores

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteOptionStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A stored option: free text or a non-negative integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(u64),
    Text(String),
}

impl OptionValue {
    /// Loose emptiness as the host defines it: `""`, `"0"` and `0` are empty
    pub fn is_empty(&self) -> bool {
        match self {
            OptionValue::Int(n) => *n == 0,
            OptionValue::Text(s) => s.is_empty() || s == "0",
        }
    }

    /// Integer view of the value, parsing text when it holds digits only
    pub fn as_int(&self) -> Option<u64> {
        match self {
            OptionValue::Int(n) => Some(*n),
            OptionValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Int(n) => serde_json::Value::from(*n),
            OptionValue::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Int(value)
    }
}

/// One step of a batch update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChange {
    Set { key: String, value: OptionValue },
    Delete { key: String },
}

impl OptionChange {
    pub fn set(key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        OptionChange::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        OptionChange::Delete { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            OptionChange::Set { key, .. } | OptionChange::Delete { key } => key,
        }
    }
}

/// Plugin-scoped option store.
///
/// Keys are the bare setting names; implementations apply the plugin prefix.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<OptionValue>>;

    async fn set(&self, key: &str, value: OptionValue) -> StorageResult<()>;

    /// Deleting a missing key is not an error
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Apply changes in order, all or nothing
    async fn apply(&self, changes: &[OptionChange]) -> StorageResult<()>;

    async fn get_or(&self, key: &str, default: OptionValue) -> StorageResult<OptionValue> {
        Ok(self.get(key).await?.unwrap_or(default))
    }
}
