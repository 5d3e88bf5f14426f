//! # Slot Policy Layer
//!
//! All scheduling decisions are made here, on top of the raw list returned by
//! the [`SlotGateway`]:
//!
//! - a provider's slots never overlap on `[start_time, end_time)`
//! - a slot only moves `Free -> Busy` (booking) or `Busy -> Free` (cancellation)
//! - slots are addressed by their exact start time
//!
//! Domain rejections are reported as `Ok(false)`; `Err` is reserved for store
//! failures. Every mutating operation holds the provider's lock from its read
//! until its write, so two callers in this process cannot lose each other's
//! update.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::{
    errors::SlotResult,
    gateway::SlotGateway,
    models::slot::{ProviderStats, SlotRecord, SlotStatus},
    store::KeyValueStore,
};

/// Slot length used when a range request does not name one.
pub const DEFAULT_SLOT_MINUTES: i64 = 60;

#[derive(Default)]
struct ProviderLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Holds one provider's lock. Dropping it releases the lock and forgets the
/// provider once no other caller holds or waits on it.
struct ProviderGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    provider_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProviderGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Clones are only made under the shard lock `remove_if` holds.
        self.locks
            .remove_if(&self.provider_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl ProviderLocks {
    async fn acquire(&self, provider_id: &str) -> ProviderGuard<'_> {
        let lock = self
            .locks
            .entry(provider_id.to_string())
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;

        ProviderGuard {
            locks: &self.locks,
            provider_id: provider_id.to_string(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

pub struct SlotPolicy {
    gateway: SlotGateway,
    locks: ProviderLocks,
}

impl SlotPolicy {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_gateway(SlotGateway::new(store))
    }

    pub fn with_gateway(gateway: SlotGateway) -> Self {
        Self {
            gateway,
            locks: ProviderLocks::default(),
        }
    }

    /// Adds one free slot unless it overlaps an existing one.
    pub async fn create_slot(
        &self,
        provider_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SlotResult<bool> {
        if end <= start {
            info!("Slot creation failed for provider {}: empty interval", provider_id);
            return Ok(false);
        }

        let _guard = self.locks.acquire(provider_id).await;
        let mut slots = self.gateway.try_get_slots(provider_id).await?;

        if slots.iter().any(|slot| slot.overlaps(start, end)) {
            info!("Slot creation failed for provider {}: overlapping slot found", provider_id);
            return Ok(false);
        }

        slots.push(SlotRecord::free(start, end));
        self.gateway.save_slots(provider_id, &slots).await?;
        info!("Slot created successfully for provider {}", provider_id);

        Ok(true)
    }

    /// Splits `[start, end)` into consecutive slots of `slot_duration_minutes`.
    ///
    /// A trailing remainder shorter than the duration is dropped. Candidates that
    /// overlap an existing slot are skipped without aborting the walk. All new
    /// slots are written together; returns whether any were created.
    pub async fn create_availability_range(
        &self,
        provider_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        slot_duration_minutes: i64,
    ) -> SlotResult<bool> {
        if slot_duration_minutes <= 0 {
            warn!(
                "Rejecting availability range for provider {}: non-positive slot duration {}",
                provider_id, slot_duration_minutes
            );
            return Ok(false);
        }
        if start >= end {
            warn!("Rejecting availability range for provider {}: start is not before end", provider_id);
            return Ok(false);
        }
        let Some(step) = Duration::try_minutes(slot_duration_minutes) else {
            warn!(
                "Rejecting availability range for provider {}: slot duration {} out of range",
                provider_id, slot_duration_minutes
            );
            return Ok(false);
        };

        info!(
            "Creating availability range for provider {} from {} to {}",
            provider_id, start, end
        );

        let _guard = self.locks.acquire(provider_id).await;
        let mut slots = self.gateway.try_get_slots(provider_id).await?;
        let existing = slots.len();

        let mut cursor = start;
        while cursor < end {
            let Some(candidate_end) = cursor.checked_add_signed(step) else {
                break;
            };
            let candidate_end = candidate_end.min(end);

            if candidate_end - cursor >= step {
                if slots.iter().any(|slot| slot.overlaps(cursor, candidate_end)) {
                    warn!("Skipping overlapping slot: {} - {}", cursor, candidate_end);
                } else {
                    slots.push(SlotRecord::free(cursor, candidate_end));
                }
            }

            cursor = candidate_end;
        }

        let created = slots.len() - existing;
        if created == 0 {
            warn!("No slots created for provider {}", provider_id);
            return Ok(false);
        }

        self.gateway.save_slots(provider_id, &slots).await?;
        info!("Created {} slots for provider {}", created, provider_id);

        Ok(true)
    }

    /// Free slots starting on `date`, ordered by start time.
    pub async fn list_available_slots(&self, provider_id: &str, date: NaiveDate) -> Vec<SlotRecord> {
        self.slots_on(provider_id, date, |slot| slot.is_free()).await
    }

    /// Every slot starting on `date`, ordered by start time.
    pub async fn list_all_slots(&self, provider_id: &str, date: NaiveDate) -> Vec<SlotRecord> {
        self.slots_on(provider_id, date, |_| true).await
    }

    pub async fn provider_stats(&self, provider_id: &str, date: NaiveDate) -> ProviderStats {
        let slots = self.list_all_slots(provider_id, date).await;
        let available_slots = slots.iter().filter(|slot| slot.is_free()).count();

        ProviderStats {
            therapist_id: provider_id.to_string(),
            date,
            total_slots: slots.len(),
            available_slots,
            booked_slots: slots.len() - available_slots,
        }
    }

    /// Free slots on `date` for each provider, in the order requested.
    pub async fn list_providers_availability(
        &self,
        provider_ids: &[String],
        date: NaiveDate,
    ) -> Vec<(String, Vec<SlotRecord>)> {
        let mut availability = Vec::with_capacity(provider_ids.len());
        for provider_id in provider_ids {
            let slots = self.list_available_slots(provider_id, date).await;
            availability.push((provider_id.clone(), slots));
        }
        availability
    }

    /// Marks the slot starting exactly at `slot_time` as busy.
    pub async fn book_slot(&self, provider_id: &str, slot_time: NaiveDateTime) -> SlotResult<bool> {
        self.transition(provider_id, slot_time, SlotStatus::Free, SlotStatus::Busy)
            .await
    }

    /// Frees the booked slot starting exactly at `slot_time`.
    pub async fn cancel_booking(
        &self,
        provider_id: &str,
        slot_time: NaiveDateTime,
    ) -> SlotResult<bool> {
        self.transition(provider_id, slot_time, SlotStatus::Busy, SlotStatus::Free)
            .await
    }

    async fn transition(
        &self,
        provider_id: &str,
        slot_time: NaiveDateTime,
        from: SlotStatus,
        to: SlotStatus,
    ) -> SlotResult<bool> {
        let _guard = self.locks.acquire(provider_id).await;
        let mut slots = self.gateway.try_get_slots(provider_id).await?;

        let Some(slot) = slots.iter_mut().find(|slot| slot.start_time == slot_time) else {
            info!(
                "Transition {} -> {} failed for provider {}: slot not found",
                from, to, provider_id
            );
            return Ok(false);
        };

        if slot.status != from {
            info!(
                "Transition {} -> {} failed for provider {}: slot is already {}",
                from, to, provider_id, slot.status
            );
            return Ok(false);
        }

        slot.status = to;
        self.gateway.save_slots(provider_id, &slots).await?;
        info!("Slot at {} for provider {} is now {}", slot_time, provider_id, to);

        Ok(true)
    }

    async fn slots_on(
        &self,
        provider_id: &str,
        date: NaiveDate,
        keep: impl Fn(&SlotRecord) -> bool,
    ) -> Vec<SlotRecord> {
        let mut slots: Vec<SlotRecord> = self
            .gateway
            .get_slots(provider_id)
            .await
            .into_iter()
            .filter(|slot| slot.date() == date && keep(slot))
            .collect();
        slots.sort_by_key(|slot| slot.start_time);
        slots
    }
}
