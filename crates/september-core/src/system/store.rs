use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Durable key-value storage trait — string keys, JSON values.
///
/// The contract the desktop shell's store must satisfy. Values survive
/// process restarts. `get` returns `Ok(None)` for an absent key; default
/// substitution is the slot's job, not the store's. Implementations are
/// expected to serialize interleaved operations on distinct keys safely.
///
/// Used as `Arc<dyn KeyedStore>`.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key` from storage. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory reference backend.
///
/// Not durable — exists for tests and for preview builds that want store
/// semantics without a desktop shell.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    /// Copy of the full key-value map, for assertions.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
