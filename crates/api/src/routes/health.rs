use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct IndexResponse {
    message: String,
    version: String,
    endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

const ENDPOINTS: [&str; 7] = [
    "POST /api/appointments/therapist/slots",
    "POST /api/appointments/therapist/availability",
    "GET /api/appointments/therapist/:therapist_id/slots?date=YYYY-MM-DD",
    "GET /api/appointments/therapist/:therapist_id/stats?date=YYYY-MM-DD",
    "GET /api/appointments/therapists?date=YYYY-MM-DD&therapist_ids=a,b",
    "POST /api/appointments/book",
    "POST /api/appointments/cancel",
];

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Therapist appointment slot service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.to_vec(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/version", get(version))
}
