use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;
use slotbook_core::KeyValueStore;

use crate::{repositories::slot_document, DbPool};

/// Slot store backed by the `slot_documents` table.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let document = slot_document::get_document(&self.pool, key).await?;
        Ok(document.map(|document| document.value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        slot_document::upsert_document(&self.pool, key, &value).await?;
        Ok(())
    }
}
