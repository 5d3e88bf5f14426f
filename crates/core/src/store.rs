//! # Store Port
//!
//! The slot gateway talks to persistence only through [`KeyValueStore`]: an
//! opaque get/set of JSON documents by key. Backends live in `slotbook-db`;
//! [`MemoryStore`] is kept here for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;
use tokio::sync::RwLock;

/// Remote document store addressed by key.
///
/// `get` returns `Ok(None)` when nothing is stored under the key. `set`
/// replaces the whole document in a single write.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, bypassing any slot encoding.
    pub async fn insert_raw(&self, key: &str, value: Value) {
        self.entries.write().await.insert(key.to_string(), value);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
