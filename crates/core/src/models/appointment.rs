use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::deserialize_timestamp;

use super::slot::{ProviderStats, SlotRecord, SlotStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub therapist_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub therapist_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: NaiveDateTime,
    pub slot_duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub therapist_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub slot_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub therapist_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub slot_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub therapist_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: SlotStatus,
}

impl SlotResponse {
    pub fn from_record(therapist_id: &str, record: SlotRecord) -> Self {
        Self {
            therapist_id: therapist_id.to_string(),
            start_time: record.start_time,
            end_time: record.end_time,
            status: record.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub success: bool,
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: ProviderStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub therapist_id: String,
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub success: bool,
    pub therapists: Vec<ProviderAvailability>,
}
