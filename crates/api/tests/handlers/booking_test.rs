use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

const SLOT_START: &str = "2100-01-04T10:00:00";
const SLOT_END: &str = "2100-01-04T11:00:00";

async fn post(ctx: &TestContext, path: &str, slot_time: &str) -> axum_test::TestResponse {
    ctx.server
        .post(path)
        .json(&json!({ "therapist_id": "123", "slot_time": slot_time }))
        .await
}

#[test_log::test(tokio::test)]
async fn test_book_then_cancel() {
    let ctx = TestContext::new();
    ctx.create_slot("123", SLOT_START, SLOT_END).await;

    let booked = post(&ctx, "/api/appointments/book", SLOT_START).await;
    assert_eq!(booked.status_code(), StatusCode::OK);
    assert_eq!(
        booked.json::<Value>(),
        json!({ "success": true, "message": "Slot booked successfully" })
    );
    assert_eq!(ctx.stored("123").await.unwrap()[0]["status"], json!("busy"));

    let again = post(&ctx, "/api/appointments/book", SLOT_START).await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        again.json::<Value>()["message"],
        json!("Failed to book slot. The slot may not exist or is already booked.")
    );

    let canceled = post(&ctx, "/api/appointments/cancel", SLOT_START).await;
    assert_eq!(canceled.status_code(), StatusCode::OK);
    assert_eq!(
        canceled.json::<Value>(),
        json!({ "success": true, "message": "Booking canceled successfully" })
    );
    assert_eq!(ctx.stored("123").await.unwrap()[0]["status"], json!("free"));
}

#[tokio::test]
async fn test_book_and_cancel_without_seconds() {
    let ctx = TestContext::new();
    ctx.create_slot("123", SLOT_START, SLOT_END).await;

    let booked = post(&ctx, "/api/appointments/book", "2100-01-04T10:00").await;
    assert_eq!(booked.status_code(), StatusCode::OK);

    let canceled = post(&ctx, "/api/appointments/cancel", "2100-01-04 10:00").await;
    assert_eq!(canceled.status_code(), StatusCode::OK);
    assert_eq!(ctx.stored("123").await.unwrap()[0]["status"], json!("free"));
}

#[tokio::test]
async fn test_book_unknown_slot() {
    let ctx = TestContext::new();
    ctx.create_slot("123", SLOT_START, SLOT_END).await;

    let response = post(&ctx, "/api/appointments/book", "2100-01-04T12:00:00").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.stored("123").await.unwrap()[0]["status"], json!("free"));
}

#[tokio::test]
async fn test_book_in_the_past_is_rejected() {
    let ctx = TestContext::new();
    ctx.create_slot("123", "2000-01-03T10:00:00", "2000-01-03T11:00:00")
        .await;

    let response = post(&ctx, "/api/appointments/book", "2000-01-03T10:00:00").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Booking time must be in the future")
    );
}

#[tokio::test]
async fn test_book_unaligned_time_is_rejected() {
    let ctx = TestContext::new();

    let response = post(&ctx, "/api/appointments/book", "2100-01-04T10:15:00").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Booking time must be rounded to the hour")
    );
}

#[tokio::test]
async fn test_cancel_free_slot_is_rejected() {
    let ctx = TestContext::new();
    ctx.create_slot("123", SLOT_START, SLOT_END).await;

    let response = post(&ctx, "/api/appointments/cancel", SLOT_START).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "Failed to cancel booking. The slot may not exist or is not booked."
        })
    );
}

#[tokio::test]
async fn test_cancel_past_booking_is_allowed() {
    let ctx = TestContext::new();
    ctx.store
        .insert_raw(
            "123",
            json!([{ "start_time": "2000-01-03T10:00:00", "end_time": "2000-01-03T11:00:00", "status": "busy" }]),
        )
        .await;

    let response = post(&ctx, "/api/appointments/cancel", "2000-01-03T10:00:00").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_booked_slot_leaves_free_listing() {
    let ctx = TestContext::new();
    ctx.create_slot("123", SLOT_START, SLOT_END).await;
    post(&ctx, "/api/appointments/book", SLOT_START).await;

    let response = ctx
        .server
        .get("/api/appointments/therapist/123/slots")
        .add_query_param("date", "2100-01-04")
        .await;

    assert_eq!(response.json::<Value>(), json!({ "success": true, "slots": [] }));
}
