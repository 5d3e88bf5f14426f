use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use slotbook_api::handlers::providers::split_ids;

use crate::test_utils::TestContext;

#[test]
fn test_split_ids_skips_blanks() {
    assert_eq!(split_ids(" a, b,,c ,"), vec!["a", "b", "c"]);
    assert!(split_ids(" , ").is_empty());
}

#[tokio::test]
async fn test_list_providers_keeps_request_order() {
    let ctx = TestContext::new();
    ctx.create_slot("a", "2023-06-01T10:00:00", "2023-06-01T11:00:00")
        .await;
    ctx.create_slot("b", "2023-06-01T09:00:00", "2023-06-01T10:00:00")
        .await;

    let response = ctx
        .server
        .get("/api/appointments/therapists")
        .add_query_param("date", "2023-06-01")
        .add_query_param("therapist_ids", "b,a,c")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "therapists": [
                { "therapist_id": "b", "slots": [{
                    "therapist_id": "b",
                    "start_time": "2023-06-01T09:00:00",
                    "end_time": "2023-06-01T10:00:00",
                    "status": "free"
                }]},
                { "therapist_id": "a", "slots": [{
                    "therapist_id": "a",
                    "start_time": "2023-06-01T10:00:00",
                    "end_time": "2023-06-01T11:00:00",
                    "status": "free"
                }]},
                { "therapist_id": "c", "slots": [] }
            ]
        })
    );
}

#[tokio::test]
async fn test_list_providers_requires_ids() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/appointments/therapists")
        .add_query_param("date", "2023-06-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("therapist_ids parameter is required")
    );
}

#[tokio::test]
async fn test_list_providers_requires_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/appointments/therapists")
        .add_query_param("therapist_ids", "a")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Date parameter is required")
    );
}
