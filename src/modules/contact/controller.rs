use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::{
    extractor::{AdminUser, AuthUser},
    schema::ErrorResponse,
};
use crate::AppState;

use super::{
    crud::ContactCrud,
    model::ContactMessage,
    schema::{ContactMessageResponse, ContactRequest, ContactSubmittedResponse},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "contact request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactSubmittedResponse>), ApiError> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let entry = ContactMessage {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        subject: req.subject,
        message: req.message,
        status: "new".to_string(),
        created_at: Utc::now(),
    };

    ContactCrud::new(state.db.clone())
        .create(&entry)
        .await
        .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ContactSubmittedResponse {
            message: "Contact form submitted successfully",
            id: entry.id,
        }),
    ))
}

/// A user's own submissions, matched on the email in their session claims.
pub async fn my_messages(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<ContactMessageResponse>>, ApiError> {
    let messages = ContactCrud::new(state.db.clone())
        .list_by_email(&auth.email)
        .await
        .map_err(internal)?;

    Ok(Json(
        messages.into_iter().map(ContactMessageResponse::from).collect(),
    ))
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<Vec<ContactMessageResponse>>, ApiError> {
    let messages = ContactCrud::new(state.db.clone())
        .list_all()
        .await
        .map_err(internal)?;

    Ok(Json(
        messages.into_iter().map(ContactMessageResponse::from).collect(),
    ))
}
