use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_slot_returns_created() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/slots")
        .json(&json!({
            "therapist_id": "123",
            "start_time": "2023-06-01T10:00:00",
            "end_time": "2023-06-01T11:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Slot created successfully" })
    );
    assert_eq!(
        ctx.stored("123").await,
        Some(json!([{
            "start_time": "2023-06-01T10:00:00",
            "end_time": "2023-06-01T11:00:00",
            "status": "free"
        }]))
    );
}

#[tokio::test]
async fn test_create_slot_accepts_timestamps_without_seconds() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/slots")
        .json(&json!({
            "therapist_id": "123",
            "start_time": "2023-06-01T10:00",
            "end_time": "2023-06-01T11:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        ctx.stored("123").await,
        Some(json!([{
            "start_time": "2023-06-01T10:00:00",
            "end_time": "2023-06-01T11:00:00",
            "status": "free"
        }]))
    );
}

#[tokio::test]
async fn test_create_overlapping_slot_is_rejected() {
    let ctx = TestContext::new();
    ctx.create_slot("123", "2023-06-01T10:00:00", "2023-06-01T11:00:00")
        .await;

    let response = ctx
        .server
        .post("/api/appointments/therapist/slots")
        .json(&json!({
            "therapist_id": "123",
            "start_time": "2023-06-01T10:00:00",
            "end_time": "2023-06-01T11:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "Failed to create slot. The slot may overlap with existing slots."
        })
    );
}

#[rstest]
#[case("2023-06-01T11:00:00", "2023-06-01T10:00:00", "End time must be after start time")]
#[case("2023-06-01T10:00:00", "2023-06-01T12:00:00", "Appointment slots must be exactly 60 minutes")]
#[case("2023-06-01T10:30:00", "2023-06-01T11:30:00", "Start time must be rounded to the hour")]
#[tokio::test]
async fn test_create_slot_validation(
    #[case] start: &str,
    #[case] end: &str,
    #[case] message: &str,
) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/slots")
        .json(&json!({ "therapist_id": "123", "start_time": start, "end_time": end }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], json!(message));
    assert_eq!(ctx.stored("123").await, None);
}

#[tokio::test]
async fn test_create_slot_requires_therapist_id() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/slots")
        .json(&json!({
            "therapist_id": "  ",
            "start_time": "2023-06-01T10:00:00",
            "end_time": "2023-06-01T11:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Therapist ID is required")
    );
}

#[tokio::test]
async fn test_create_availability_partitions_range() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/availability")
        .json(&json!({
            "therapist_id": "t1",
            "start_time": "2023-06-01T09:00:00",
            "end_time": "2023-06-01T17:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let stats = ctx
        .server
        .get("/api/appointments/therapist/t1/stats")
        .add_query_param("date", "2023-06-01")
        .await;

    assert_eq!(stats.status_code(), StatusCode::OK);
    assert_eq!(
        stats.json::<Value>(),
        json!({
            "success": true,
            "stats": {
                "therapist_id": "t1",
                "date": "2023-06-01",
                "total_slots": 8,
                "available_slots": 8,
                "booked_slots": 0
            }
        })
    );
}

#[tokio::test]
async fn test_create_availability_over_covered_range_is_rejected() {
    let ctx = TestContext::new();
    ctx.create_slot("t1", "2023-06-01T09:00:00", "2023-06-01T10:00:00")
        .await;

    let response = ctx
        .server
        .post("/api/appointments/therapist/availability")
        .json(&json!({
            "therapist_id": "t1",
            "start_time": "2023-06-01T09:00:00",
            "end_time": "2023-06-01T10:00:00",
            "slot_duration_minutes": 60
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn test_create_availability_rejects_zero_duration() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/appointments/therapist/availability")
        .json(&json!({
            "therapist_id": "t1",
            "start_time": "2023-06-01T09:00:00",
            "end_time": "2023-06-01T17:00:00",
            "slot_duration_minutes": 0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Slot duration must be a positive number of minutes")
    );
}

#[tokio::test]
async fn test_list_slots_requires_date() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/appointments/therapist/123/slots").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Date parameter is required" })
    );
}

#[tokio::test]
async fn test_list_slots_rejects_bad_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/appointments/therapist/123/slots")
        .add_query_param("date", "June 1st")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn test_list_slots_for_unknown_provider_is_empty() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/appointments/therapist/nobody/slots")
        .add_query_param("date", "2023-06-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "success": true, "slots": [] }));
}

#[tokio::test]
async fn test_list_slots_hides_booked_unless_requested() {
    let ctx = TestContext::new();
    ctx.store
        .insert_raw(
            "123",
            json!([
                { "start_time": "2023-06-01T11:00:00", "end_time": "2023-06-01T12:00:00", "status": "busy" },
                { "start_time": "2023-06-01T10:00:00", "end_time": "2023-06-01T11:00:00", "status": "free" },
                { "start_time": "2023-06-02T10:00:00", "end_time": "2023-06-02T11:00:00", "status": "free" }
            ]),
        )
        .await;

    let free = ctx
        .server
        .get("/api/appointments/therapist/123/slots")
        .add_query_param("date", "2023-06-01")
        .await;

    assert_eq!(
        free.json::<Value>(),
        json!({
            "success": true,
            "slots": [{
                "therapist_id": "123",
                "start_time": "2023-06-01T10:00:00",
                "end_time": "2023-06-01T11:00:00",
                "status": "free"
            }]
        })
    );

    let all = ctx
        .server
        .get("/api/appointments/therapist/123/slots")
        .add_query_param("date", "2023-06-01T08:00:00")
        .add_query_param("include_booked", "true")
        .await;

    let body = all.json::<Value>();
    let statuses: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["free", "busy"]);
}

#[tokio::test]
async fn test_list_slots_tolerates_unexpected_document() {
    let ctx = TestContext::new();
    ctx.store.insert_raw("123", json!({ "not": "a list" })).await;

    let response = ctx
        .server
        .get("/api/appointments/therapist/123/slots")
        .add_query_param("date", "2023-06-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "success": true, "slots": [] }));
}
