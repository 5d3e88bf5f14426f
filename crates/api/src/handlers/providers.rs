use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use slotbook_core::{
    errors::SlotError,
    models::appointment::{ProviderAvailability, ProvidersResponse, SlotResponse},
    validation::parse_date,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct ProvidersQuery {
    pub date: Option<String>,
    /// Comma separated provider ids
    pub therapist_ids: Option<String>,
}

/// Splits `a, b,,c` into `["a", "b", "c"]`.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ProvidersQuery>, QueryRejection>,
) -> Result<Json<ProvidersResponse>, AppError> {
    let Query(query) = query?;

    let date = match query.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => parse_date(date)?,
        _ => {
            return Err(AppError(SlotError::Validation(
                "Date parameter is required".to_string(),
            )));
        }
    };

    let ids = split_ids(query.therapist_ids.as_deref().unwrap_or_default());
    if ids.is_empty() {
        return Err(AppError(SlotError::Validation(
            "therapist_ids parameter is required".to_string(),
        )));
    }

    let therapists = state
        .policy
        .list_providers_availability(&ids, date)
        .await
        .into_iter()
        .map(|(therapist_id, records)| ProviderAvailability {
            slots: records
                .into_iter()
                .map(|record| SlotResponse::from_record(&therapist_id, record))
                .collect(),
            therapist_id,
        })
        .collect();

    Ok(Json(ProvidersResponse {
        success: true,
        therapists,
    }))
}
