use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn booking_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(controller::list_all).post(controller::create))
        .route("/user", get(controller::my_bookings))
}
