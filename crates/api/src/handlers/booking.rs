use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Local;
use slotbook_core::{
    errors::SlotError,
    models::appointment::{BookSlotRequest, CancelBookingRequest, MessageResponse},
    validation::validate_booking_time,
};
use std::sync::Arc;

use super::require_therapist_id;
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookSlotRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    let therapist_id = require_therapist_id(&payload.therapist_id)?;

    // Slot times are naive local times, so "now" is too.
    validate_booking_time(payload.slot_time, Local::now().naive_local())?;

    let booked = state.policy.book_slot(therapist_id, payload.slot_time).await?;
    if !booked {
        return Err(AppError(SlotError::Rejected(
            "Failed to book slot. The slot may not exist or is already booked.".to_string(),
        )));
    }

    Ok(Json(MessageResponse::ok("Slot booked successfully")))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CancelBookingRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    let therapist_id = require_therapist_id(&payload.therapist_id)?;

    let canceled = state
        .policy
        .cancel_booking(therapist_id, payload.slot_time)
        .await?;
    if !canceled {
        return Err(AppError(SlotError::Rejected(
            "Failed to cancel booking. The slot may not exist or is not booked.".to_string(),
        )));
    }

    Ok(Json(MessageResponse::ok("Booking canceled successfully")))
}
