use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::{
    extractor::{AdminUser, MaybeUser},
    schema::ErrorResponse,
};
use crate::AppState;

use super::{
    crud::InquiryCrud,
    model::Inquiry,
    schema::{InquiryCreatedResponse, InquiryFilter, InquiryRequest, InquiryResponse},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "inquiry request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<InquiryRequest>,
) -> Result<(StatusCode, Json<InquiryCreatedResponse>), ApiError> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = InquiryCrud::new(state.db.clone());

    let product_name = match req.product_id.as_deref() {
        Some(product_id) => crud.product_name(product_id).await.map_err(internal)?,
        None => None,
    };

    let inquiry = Inquiry {
        id: Uuid::new_v4().to_string(),
        user_id: user.map(|u| u.id),
        product_id: req.product_id,
        name: req.name,
        email: req.email,
        phone: req.phone,
        message: req.message,
        status: "pending".to_string(),
        created_at: Utc::now(),
    };

    crud.create(&inquiry).await.map_err(internal)?;

    // Acknowledgement mail is best-effort and never blocks the response.
    if let Some(product_name) = product_name {
        let mailer = state.mailer.clone();
        let (email, name, message) =
            (inquiry.email.clone(), inquiry.name.clone(), inquiry.message.clone());
        tokio::spawn(async move {
            if let Err(e) = mailer
                .send_inquiry_ack(&email, &name, &product_name, &message)
                .await
            {
                tracing::warn!(email, error = %e, "inquiry ack email failed");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(InquiryCreatedResponse {
            message: "Inquiry submitted successfully",
            id: inquiry.id,
        }),
    ))
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(filter): Query<InquiryFilter>,
) -> Result<Json<Vec<InquiryResponse>>, ApiError> {
    let inquiries = InquiryCrud::new(state.db.clone())
        .list(filter.product_id.as_deref())
        .await
        .map_err(internal)?;

    Ok(Json(
        inquiries.into_iter().map(InquiryResponse::from).collect(),
    ))
}
