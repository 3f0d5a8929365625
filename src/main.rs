use std::sync::Arc;

use boutique_api::config::{init_db, Config};
use boutique_api::services::jwt::JwtService;
use boutique_api::services::mailer::{HttpMailer, LogMailer, Mailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boutique_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to MySQL");
    tracing::info!("Connected to MySQL");

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    let mailer: Arc<dyn Mailer> = match config.email {
        Some(email) => Arc::new(HttpMailer::new(email.api_url, email.api_key, email.from)),
        None => {
            tracing::warn!("no email provider configured, using log transport");
            Arc::new(LogMailer)
        }
    };

    let jwt_service = JwtService::new(config.jwt_secret, config.jwt_ttl_days);

    let app = boutique_api::create_app(
        db,
        jwt_service,
        mailer,
        config.otp_ttl_minutes,
        config.cookie_secure,
    )
    .await;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await.expect("Server error");
}
