use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use std::future::{ready, Future};
use std::sync::Arc;

use crate::services::session::extract_token;
use crate::AppState;

use super::{model::Role, schema::ErrorResponse};

/// Identity established from a verified session token. Carries the claim
/// snapshot, not a fresh database row.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Same as [`AuthUser`] but additionally requires the ADMIN role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

/// Optional identity for routes that work both ways, like bookings.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

fn authenticate(parts: &Parts, state: &Arc<AppState>) -> Option<AuthUser> {
    let token = extract_token(&parts.headers)?;
    let data = state.jwt_service.verify(&token).ok()?;
    // Unknown role strings degrade to USER rather than erroring out.
    let role = data.claims.role.parse().unwrap_or(Role::User);

    Some(AuthUser {
        id: data.claims.sub,
        email: data.claims.email,
        role,
    })
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn unauthorized() -> Rejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Authentication required")),
    )
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Rejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        ready(authenticate(parts, state).ok_or_else(unauthorized))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = Rejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match authenticate(parts, state) {
            None => Err(unauthorized()),
            Some(user) if user.role != Role::Admin => Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Admin access required")),
            )),
            Some(user) => Ok(AdminUser(user)),
        };
        ready(result)
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        ready(Ok(MaybeUser(authenticate(parts, state))))
    }
}
