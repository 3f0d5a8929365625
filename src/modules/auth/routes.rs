use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .route("/verify-otp", post(controller::verify_otp))
        .route("/resend-otp", post(controller::resend_otp))
        .route("/logout", post(controller::logout))
}

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/profile",
        get(controller::get_profile).put(controller::update_profile),
    )
}
