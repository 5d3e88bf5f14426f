use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/therapist/slots",
            post(handlers::slots::create_slot),
        )
        .route(
            "/api/appointments/therapist/availability",
            post(handlers::slots::create_availability),
        )
        .route(
            "/api/appointments/therapist/:therapist_id/slots",
            get(handlers::slots::list_slots),
        )
        .route(
            "/api/appointments/therapist/:therapist_id/stats",
            get(handlers::slots::provider_stats),
        )
        .route(
            "/api/appointments/therapists",
            get(handlers::providers::list_providers),
        )
        .route("/api/appointments/book", post(handlers::booking::book_slot))
        .route(
            "/api/appointments/cancel",
            post(handlers::booking::cancel_booking),
        )
}
