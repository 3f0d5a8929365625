use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::services::{
    hashing,
    session::{clear_session_cookie, session_cookie},
};
use crate::AppState;

use super::{
    crud::{AuthError, OtpCrud, OtpOutcome, UserCrud},
    extractor::AuthUser,
    model::{Role, User},
    schema::{
        LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
        ResendOtpRequest, UpdateProfileRequest, UserResponse, VerifyOtpRequest, VerifyOtpResponse,
    },
};

/// Issues a challenge and delivers it. If delivery fails, the just-created
/// challenge is rolled back so no live code exists that the user never saw.
async fn send_challenge(state: &AppState, email: &str, name: &str) -> Result<(), AuthError> {
    let otp = OtpCrud::new(state.db.clone(), state.otp_ttl);
    let code = otp.issue(email).await?;

    if let Err(e) = state.mailer.send_otp(email, name, &code).await {
        tracing::warn!(email, error = %e, "otp delivery failed, rolling back challenge");
        otp.delete(email).await?;
        return Err(e.into());
    }

    Ok(())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let users = UserCrud::new(state.db.clone());

    if users.email_exists(&req.email).await? {
        return Err(AuthError::DuplicateEmail);
    }

    let password_hash =
        hashing::hash_password(&req.password).map_err(|e| AuthError::Hashing(e.to_string()))?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        avatar: None,
        password_hash,
        role: Role::User,
        verified: false,
        created_at: now,
        updated_at: now,
    };

    if let Err(e) = users.create(&user).await {
        // The unique index catches registrations racing the existence check.
        if is_unique_violation(&e) {
            return Err(AuthError::DuplicateEmail);
        }
        return Err(e.into());
    }

    send_challenge(&state, &user.email, &user.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully. Please verify your email.",
            user_id: user.id,
            otp_sent: true,
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let users = UserCrud::new(state.db.clone());

    // Unknown email and wrong password collapse into the same error so the
    // endpoint cannot be used to enumerate accounts.
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = hashing::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    send_challenge(&state, &user.email, &user.name).await?;

    Ok(Json(LoginResponse {
        message: "OTP sent to your email",
        otp_sent: true,
    }))
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<(StatusCode, CookieJar, Json<VerifyOtpResponse>), AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let otp = OtpCrud::new(state.db.clone(), state.otp_ttl);

    match otp.verify(&req.email, &req.otp).await? {
        OtpOutcome::NoSuchChallenge => return Err(AuthError::NoSuchChallenge),
        OtpOutcome::Mismatch => return Err(AuthError::CodeMismatch),
        OtpOutcome::Expired => return Err(AuthError::CodeExpired),
        OtpOutcome::Valid => {}
    }

    let users = UserCrud::new(state.db.clone());
    let mut user = users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let first_verification = !user.verified;
    if first_verification {
        users.mark_verified(&user.id).await?;
        user.verified = true;
    }

    let token = state
        .jwt_service
        .mint(&user.id, &user.email, user.role.as_str())?;

    if first_verification {
        // Welcome mail is best-effort; a transport hiccup must not fail the
        // login that just succeeded.
        let mailer = state.mailer.clone();
        let (email, name) = (user.email.clone(), user.name.clone());
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&email, &name).await {
                tracing::warn!(email, error = %e, "welcome email failed");
            }
        });
    }

    let cookie = session_cookie(
        &token,
        state.jwt_service.session_duration_secs(),
        state.cookie_secure,
    );

    Ok((
        StatusCode::OK,
        jar.add(cookie),
        Json(VerifyOtpResponse {
            message: "Login successful",
            token,
            user: UserResponse::from(user),
        }),
    ))
}

pub async fn resend_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResendOtpRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let users = UserCrud::new(state.db.clone());
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    send_challenge(&state, &user.email, &user.name).await?;

    Ok(Json(MessageResponse {
        message: "OTP resent successfully",
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AuthError> {
    Ok((
        jar.add(clear_session_cookie(state.cookie_secure)),
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AuthError> {
    let users = UserCrud::new(state.db.clone());
    let user = users
        .find_by_id(&auth.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let users = UserCrud::new(state.db.clone());
    users
        .update_profile(&auth.id, req.name.as_deref(), req.phone.as_deref())
        .await?;

    let user = users
        .find_by_id(&auth.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(user)))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
