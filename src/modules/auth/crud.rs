use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::DbPool;
use crate::modules::auth::{
    model::{OtpChallenge, User},
    schema::ErrorResponse,
};
use crate::services::mailer::MailerError;

/// Wrong guesses allowed per challenge before it is discarded and a new
/// code must be requested. A mistyped digit never locks the user out, but a
/// brute-force sweep of the 6-digit space does not get a free run either.
pub const MAX_OTP_ATTEMPTS: i32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid or expired code")]
    NoSuchChallenge,
    #[error("Invalid code")]
    CodeMismatch,
    #[error("Code has expired. Please request a new one.")]
    CodeExpired,
    #[error("Authentication required")]
    Unauthorized,
    #[error("Admin access required")]
    Forbidden,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Mail(#[from] MailerError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::NoSuchChallenge | Self::CodeMismatch | Self::CodeExpired => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // Internal failures are logged server-side and never leaked.
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "auth request failed");
            ErrorResponse::new("Internal server error")
        } else {
            ErrorResponse::new(self.to_string())
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// USERS
// =============================================================================

pub struct UserCrud {
    pool: DbPool,
}

impl UserCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, avatar, password_hash, role, verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.avatar)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    pub async fn mark_verified(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET verified = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Only name and phone are mutable here; email, role and password stay
    /// fixed through this path.
    pub async fn update_profile(
        &self,
        id: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE(?, name), phone = COALESCE(?, phone)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// OTP LEDGER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    Valid,
    NoSuchChallenge,
    Mismatch,
    Expired,
}

pub struct OtpCrud {
    pool: DbPool,
    ttl: Duration,
}

impl OtpCrud {
    pub fn new(pool: DbPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Issues a fresh challenge for the email, atomically superseding any
    /// live one. The unique key on email serializes concurrent issues; last
    /// writer wins. Returns the code for out-of-band delivery.
    pub async fn issue(&self, email: &str) -> Result<String, sqlx::Error> {
        let code = generate_code();
        let now = Utc::now();
        let expires_at = now + self.ttl;

        sqlx::query(
            r#"
            INSERT INTO otp_challenges (email, code, attempts, expires_at, created_at)
            VALUES (?, ?, 0, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                attempts = 0,
                expires_at = VALUES(expires_at),
                created_at = VALUES(created_at)
            "#,
        )
        .bind(email)
        .bind(&code)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(code)
    }

    /// Single-use check. An expired challenge is purged on first touch, a
    /// matching one is consumed, a mismatched one is kept for retries until
    /// the attempt cap deletes it.
    pub async fn verify(&self, email: &str, candidate: &str) -> Result<OtpOutcome, sqlx::Error> {
        let challenge = sqlx::query_as::<_, OtpChallenge>(
            "SELECT * FROM otp_challenges WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(challenge) = challenge else {
            return Ok(OtpOutcome::NoSuchChallenge);
        };

        if Utc::now() > challenge.expires_at {
            self.delete(email).await?;
            return Ok(OtpOutcome::Expired);
        }

        if challenge.code != candidate {
            if challenge.attempts + 1 >= MAX_OTP_ATTEMPTS {
                self.delete(email).await?;
            } else {
                sqlx::query(
                    "UPDATE otp_challenges SET attempts = attempts + 1 WHERE email = ?",
                )
                .bind(email)
                .execute(&self.pool)
                .await?;
            }
            return Ok(OtpOutcome::Mismatch);
        }

        self.delete(email).await?;
        Ok(OtpOutcome::Valid)
    }

    /// Also the rollback path when the OTP email cannot be delivered, so no
    /// live challenge is left that the user never received.
    pub async fn delete(&self, email: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM otp_challenges WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Uniform 6-digit code as a zero-padded string. Treating it as an integer
/// would truncate leading zeros.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}
