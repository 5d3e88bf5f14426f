use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use slotbook_core::{
    errors::SlotError,
    models::appointment::{
        CreateAvailabilityRequest, CreateSlotRequest, MessageResponse, SlotResponse,
        SlotsResponse, StatsResponse,
    },
    policy::DEFAULT_SLOT_MINUTES,
    validation::{parse_date, validate_range_window, validate_slot_window},
};
use std::sync::Arc;
use tracing::info;

use super::require_therapist_id;
use crate::{middleware::error_handling::AppError, ApiState};

/// Query string for the per-provider listing endpoints.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
    #[serde(default)]
    pub include_booked: bool,
}

impl DateQuery {
    fn required_date(&self) -> Result<chrono::NaiveDate, AppError> {
        match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => Ok(parse_date(date)?),
            _ => Err(AppError(SlotError::Validation(
                "Date parameter is required".to_string(),
            ))),
        }
    }
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;
    let therapist_id = require_therapist_id(&payload.therapist_id)?;

    validate_slot_window(payload.start_time, payload.end_time, state.slot_duration)?;

    let created = state
        .policy
        .create_slot(therapist_id, payload.start_time, payload.end_time)
        .await?;

    if !created {
        return Err(AppError(SlotError::Rejected(
            "Failed to create slot. The slot may overlap with existing slots.".to_string(),
        )));
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Slot created successfully")),
    ))
}

#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateAvailabilityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;
    let therapist_id = require_therapist_id(&payload.therapist_id)?;
    let duration = payload.slot_duration_minutes.unwrap_or(DEFAULT_SLOT_MINUTES);

    validate_range_window(payload.start_time, payload.end_time, duration)?;

    let created = state
        .policy
        .create_availability_range(therapist_id, payload.start_time, payload.end_time, duration)
        .await?;

    if !created {
        return Err(AppError(SlotError::Rejected(
            "Failed to create availability. No free slots fit in the requested range.".to_string(),
        )));
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Availability created successfully")),
    ))
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(therapist_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<SlotsResponse>, AppError> {
    let Query(query) = query?;
    let date = query.required_date()?;

    let records = if query.include_booked {
        state.policy.list_all_slots(&therapist_id, date).await
    } else {
        state.policy.list_available_slots(&therapist_id, date).await
    };
    info!("Listing {} slots for provider {} on {}", records.len(), therapist_id, date);

    let slots = records
        .into_iter()
        .map(|record| SlotResponse::from_record(&therapist_id, record))
        .collect();

    Ok(Json(SlotsResponse { success: true, slots }))
}

#[axum::debug_handler]
pub async fn provider_stats(
    State(state): State<Arc<ApiState>>,
    Path(therapist_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Query(query) = query?;
    let date = query.required_date()?;

    let stats = state.policy.provider_stats(&therapist_id, date).await;

    Ok(Json(StatsResponse { success: true, stats }))
}
