//! # Slot Store Gateway
//!
//! Maps a provider's slot list onto a single document in a [`KeyValueStore`].
//! The gateway owns the storage contract: a JSON array of [`SlotRecord`]s under
//! the provider id. Anything else stored under that key is treated as empty.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    errors::{SlotError, SlotResult},
    models::slot::SlotRecord,
    store::KeyValueStore,
};

#[derive(Clone)]
pub struct SlotGateway {
    store: Arc<dyn KeyValueStore>,
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl SlotGateway {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Lenient read used by listing paths.
    ///
    /// Store failures and undecodable documents are reported as an empty list.
    /// A store failure is logged as an error; a corrupt record is logged as a
    /// warning naming the offending record.
    pub async fn get_slots(&self, provider_id: &str) -> Vec<SlotRecord> {
        match self.try_get_slots(provider_id).await {
            Ok(slots) => slots,
            Err(e @ SlotError::CorruptRecord { .. }) => {
                warn!("Ignoring stored slot list: {}", e);
                Vec::new()
            }
            Err(e) => {
                error!("Error getting slots for provider {}: {}", provider_id, e);
                Vec::new()
            }
        }
    }

    /// Strict read used inside read-modify-write operations.
    pub async fn try_get_slots(&self, provider_id: &str) -> SlotResult<Vec<SlotRecord>> {
        let value = self.store.get(provider_id).await?;
        decode_slots(provider_id, value)
    }

    /// Overwrites the provider's whole list with one store write.
    ///
    /// After the write the document is read back and compared; a mismatch is
    /// only logged.
    pub async fn save_slots(&self, provider_id: &str, slots: &[SlotRecord]) -> SlotResult<()> {
        let value = serde_json::to_value(slots).map_err(|e| SlotError::Internal(Box::new(e)))?;

        if let Err(e) = self.store.set(provider_id, value.clone()).await {
            error!("Error saving slots for provider {}: {}", provider_id, e);
            return Err(SlotError::Store(e));
        }

        match self.store.get(provider_id).await {
            Ok(Some(saved)) if saved == value => {
                debug!("Saved {} slots for provider {}", slots.len(), provider_id);
            }
            Ok(_) => warn!(
                "Data verification failed for provider {}: saved data does not match input data",
                provider_id
            ),
            Err(e) => warn!(
                "Data verification skipped for provider {}: read-back failed: {}",
                provider_id, e
            ),
        }

        Ok(())
    }
}

fn decode_slots(provider_id: &str, value: Option<Value>) -> SlotResult<Vec<SlotRecord>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<SlotRecord>(item).map_err(|e| SlotError::CorruptRecord {
                    provider_id: provider_id.to_string(),
                    reason: format!("record {}: {}", index, e),
                })
            })
            .collect(),
        Some(other) => {
            warn!(
                "Unexpected data format for provider {}. Expected list, got {}",
                provider_id,
                value_kind(&other)
            );
            Ok(Vec::new())
        }
    }
}
