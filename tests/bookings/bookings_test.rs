use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{self, TestContext};

fn booking_payload(email: &str) -> serde_json::Value {
    json!({
        "name": "Alice Example",
        "email": email,
        "phone": "+1 555 123 4567",
        "date": "2026-10-15",
        "time": "14:30",
        "message": "Private fitting appointment"
    })
}

#[tokio::test]
#[serial]
async fn guest_can_book_an_appointment() {
    let ctx = TestContext::new().await;
    let email = common::test_email();

    let response = ctx.server.post("/bookings").json(&booking_payload(&email)).await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    let id = body["id"].as_str().expect("booking id");

    let (user_id, status): (Option<String>, String) =
        sqlx::query_as("SELECT user_id, status FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    assert!(user_id.is_none());
    assert_eq!(status, "pending");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn authenticated_booking_is_linked_to_the_user() {
    let ctx = TestContext::new().await;
    let email = common::test_email();
    let token = common::register_and_verify(&ctx, &email).await;

    ctx.server
        .post("/bookings")
        .authorization_bearer(&token)
        .json(&booking_payload(&email))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/bookings/user")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["date"], "2026-10-15");
    assert_eq!(bookings[0]["time"], "14:30");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn booking_rejects_malformed_date() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/bookings")
        .json(&json!({
            "name": "Alice Example",
            "email": common::test_email(),
            "phone": "+1 555 123 4567",
            "date": "15/10/2026",
            "time": "14:30"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn my_bookings_requires_authentication() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/bookings/user").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn full_listing_is_admin_only() {
    let ctx = TestContext::new().await;
    let token = common::register_and_verify(&ctx, &common::test_email()).await;

    let as_user = ctx
        .server
        .get("/bookings")
        .authorization_bearer(&token)
        .await;
    as_user.assert_status(StatusCode::FORBIDDEN);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn admin_sees_all_bookings() {
    let ctx = TestContext::new().await;
    let token = common::admin_token(&ctx, &common::test_email()).await;

    ctx.server
        .post("/bookings")
        .json(&booking_payload(&common::test_email()))
        .await
        .assert_status(StatusCode::CREATED);
    ctx.server
        .post("/bookings")
        .json(&booking_payload(&common::test_email()))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/bookings")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["bookings"].as_array().unwrap().len(), 2);

    ctx.cleanup().await;
}
