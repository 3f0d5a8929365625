pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::DbPool;
use modules::auth::{auth_routes, user_routes};
use modules::bookings::booking_routes;
use modules::contact::contact_routes;
use modules::inquiries::inquiry_routes;
use modules::products::{category_routes, product_routes};
use services::jwt::JwtService;
use services::mailer::Mailer;
use services::rate_limit::{create_rate_limiter, RateLimitLayer};
use services::security::security_headers;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
    pub mailer: Arc<dyn Mailer>,
    pub otp_ttl: Duration,
    pub cookie_secure: bool,
}

pub async fn create_app(
    db: DbPool,
    jwt_service: JwtService,
    mailer: Arc<dyn Mailer>,
    otp_ttl_minutes: i64,
    cookie_secure: bool,
) -> Router {
    let state = Arc::new(AppState {
        db,
        jwt_service,
        mailer,
        otp_ttl: Duration::minutes(otp_ttl_minutes),
        cookie_secure,
    });

    // Global backstop, not a per-client quota.
    let rate_limiter = create_rate_limiter(120, 200);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/contact", contact_routes())
        .nest("/bookings", booking_routes())
        .nest("/inquiries", inquiry_routes())
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Boutique Storefront API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
