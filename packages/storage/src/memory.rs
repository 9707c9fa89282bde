// ABOUTME: In-memory option store
// ABOUTME: Map-backed KeyValueStore for tests and throwaway servers

use async_trait::async_trait;
use rstore_core::constants::{prefixed, OPTION_PREFIX};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{KeyValueStore, OptionChange, OptionValue, StorageResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    options: RwLock<BTreeMap<String, OptionValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with bare `(key, value)` pairs
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        let options = values
            .into_iter()
            .map(|(k, v)| (prefixed(k.as_ref()), v.into()))
            .collect();
        Self {
            options: RwLock::new(options),
        }
    }

    /// Current contents keyed by bare setting name
    pub async fn snapshot(&self) -> BTreeMap<String, OptionValue> {
        self.options
            .read()
            .await
            .iter()
            .map(|(k, v)| {
                let bare = k.strip_prefix(OPTION_PREFIX).unwrap_or(k);
                (bare.to_string(), v.clone())
            })
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<OptionValue>> {
        Ok(self.options.read().await.get(&prefixed(key)).cloned())
    }

    async fn set(&self, key: &str, value: OptionValue) -> StorageResult<()> {
        self.options.write().await.insert(prefixed(key), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.options.write().await.remove(&prefixed(key));
        Ok(())
    }

    async fn apply(&self, changes: &[OptionChange]) -> StorageResult<()> {
        let mut options = self.options.write().await;
        for change in changes {
            match change {
                OptionChange::Set { key, value } => {
                    options.insert(prefixed(key), value.clone());
                }
                OptionChange::Delete { key } => {
                    options.remove(&prefixed(key));
                }
            }
        }
        Ok(())
    }
}
