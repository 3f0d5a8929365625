use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{self, TestContext};
use crate::products::catalog_test::{seed_category, seed_product, SeedProduct};

#[tokio::test]
#[serial]
async fn guest_can_submit_general_inquiry() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/inquiries")
        .json(&json!({
            "name": "Alice Example",
            "email": common::test_email(),
            "message": "Do you ship internationally?"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn product_inquiry_carries_the_product_name() {
    let ctx = TestContext::new().await;
    let token = common::admin_token(&ctx, &common::test_email()).await;
    let (category_id, _slug) = seed_category(&ctx.db, "Accessories").await;
    let product_id = seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Silk Scarf", ..Default::default() },
    )
    .await;

    ctx.server
        .post("/inquiries")
        .json(&json!({
            "name": "Alice Example",
            "email": common::test_email(),
            "message": "Is this available in ivory?",
            "product_id": product_id
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/inquiries")
        .add_query_param("product_id", &product_id)
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let inquiries = body.as_array().unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0]["product_name"], "Silk Scarf");
    assert_eq!(inquiries[0]["status"], "pending");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn product_filter_excludes_other_inquiries() {
    let ctx = TestContext::new().await;
    let token = common::admin_token(&ctx, &common::test_email()).await;
    let (category_id, _slug) = seed_category(&ctx.db, "Accessories").await;
    let product_id = seed_product(&ctx.db, &category_id, SeedProduct::default()).await;

    ctx.server
        .post("/inquiries")
        .json(&json!({
            "name": "Alice Example",
            "email": common::test_email(),
            "message": "General question"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let filtered = ctx
        .server
        .get("/inquiries")
        .add_query_param("product_id", &product_id)
        .authorization_bearer(&token)
        .await;
    let body: serde_json::Value = filtered.json();
    assert!(body.as_array().unwrap().is_empty());

    let unfiltered = ctx
        .server
        .get("/inquiries")
        .authorization_bearer(&token)
        .await;
    let body: serde_json::Value = unfiltered.json();
    assert_eq!(body.as_array().unwrap().len(), 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn inquiry_rejects_empty_message() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/inquiries")
        .json(&json!({
            "name": "Alice Example",
            "email": common::test_email(),
            "message": ""
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn listing_is_admin_only() {
    let ctx = TestContext::new().await;
    let token = common::register_and_verify(&ctx, &common::test_email()).await;

    let anonymous = ctx.server.get("/inquiries").await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);

    let as_user = ctx
        .server
        .get("/inquiries")
        .authorization_bearer(&token)
        .await;
    as_user.assert_status(StatusCode::FORBIDDEN);

    ctx.cleanup().await;
}
