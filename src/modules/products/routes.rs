use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(controller::list_products).post(controller::create_product),
        )
        .route("/{id}", get(controller::get_product))
}

pub fn category_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(controller::list_categories))
}
