use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking state of a slot. Stored as `"free"` / `"busy"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Busy,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Free => write!(f, "free"),
            SlotStatus::Busy => write!(f, "busy"),
        }
    }
}

/// One entry of a provider's persisted slot list.
///
/// Timestamps are naive local times encoded as ISO-8601 strings
/// (`2023-06-01T10:00:00`). The interval is half-open: `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: SlotStatus,
}

impl SlotRecord {
    pub fn free(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
            status: SlotStatus::Free,
        }
    }

    /// Half-open overlap test; slots that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end_time && end > self.start_time
    }

    pub fn is_free(&self) -> bool {
        self.status == SlotStatus::Free
    }

    /// Calendar day the slot starts on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Per-day slot counts for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStats {
    pub therapist_id: String,
    pub date: NaiveDate,
    pub total_slots: usize,
    pub available_slots: usize,
    pub booked_slots: usize,
}
