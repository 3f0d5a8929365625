use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn inquiry_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(controller::list_all).post(controller::create))
}
