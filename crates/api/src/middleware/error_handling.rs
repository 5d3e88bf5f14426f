//! # Error Handling Middleware
//!
//! Maps `SlotError` values to HTTP responses. Every failure is rendered as
//! `{"success": false, "message": ...}`; client-side problems (bad input,
//! domain rejections, store write failures) use 400 and only internal faults
//! use 500.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::SlotError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::SlotError;
///
/// async fn handler(created: bool) -> Result<Json<&'static str>, AppError> {
///     if !created {
///         return Err(AppError(SlotError::Rejected("The slot may overlap".to_string())));
///     }
///     Ok(Json("created"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Rejected(_) => StatusCode::BAD_REQUEST,
            SlotError::Store(_) => StatusCode::BAD_REQUEST,
            SlotError::CorruptRecord { .. } => StatusCode::BAD_REQUEST,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "success": false, "message": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Store adapters report `eyre::Report`; those surface as store errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Store(err))
    }
}

/// Malformed JSON bodies are validation failures, not axum's default 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

/// Maps a SlotError to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
