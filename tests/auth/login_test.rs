use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{self, TestContext};

async fn register(ctx: &TestContext, email: &str) {
    ctx.server
        .post("/auth/register")
        .json(&json!({
            "name": "Alice Example",
            "email": email,
            "password": common::test_password()
        }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
#[serial]
async fn login_with_valid_credentials_issues_otp() {
    let ctx = TestContext::new().await;
    let email = common::test_email();
    register(&ctx, &email).await;

    let response = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": common::test_password() }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["otp_sent"], true);

    let code = common::fetch_otp(&ctx.db, &email).await;
    assert_eq!(code.len(), 6);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await;
    let email = common::test_email();
    register(&ctx, &email).await;

    let response = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": "WrongPassword123!" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn login_does_not_reveal_whether_email_exists() {
    let ctx = TestContext::new().await;
    let email = common::test_email();
    register(&ctx, &email).await;

    let wrong_password = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": "WrongPassword123!" }))
        .await;
    let unknown_email = ctx
        .server
        .post("/auth/login")
        .json(&json!({ "email": common::test_email(), "password": common::test_password() }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_email.text());

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn login_supersedes_previous_challenge() {
    let ctx = TestContext::new().await;
    let email = common::test_email();
    register(&ctx, &email).await;

    let first_code = common::fetch_otp(&ctx.db, &email).await;

    ctx.server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": common::test_password() }))
        .await
        .assert_status_ok();

    let second_code = common::fetch_otp(&ctx.db, &email).await;

    // Codes can collide by chance; only the superseded one must be dead.
    if first_code != second_code {
        let stale = ctx
            .server
            .post("/auth/verify-otp")
            .json(&json!({ "email": email, "otp": first_code }))
            .await;
        stale.assert_status(StatusCode::BAD_REQUEST);
    }

    let response = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": email, "otp": second_code }))
        .await;
    response.assert_status_ok();

    ctx.cleanup().await;
}
