use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::{
    extractor::{AdminUser, AuthUser, MaybeUser},
    schema::ErrorResponse,
};
use crate::AppState;

use super::{
    crud::BookingCrud,
    model::Booking,
    schema::{BookingCreatedResponse, BookingListResponse, BookingRequest, BookingResponse},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "booking request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

/// Booking an appointment works for guests too; a logged-in caller gets the
/// booking attached to their account.
pub async fn create(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        user_id: user.map(|u| u.id),
        name: req.name,
        email: req.email,
        phone: req.phone,
        date: req.date,
        time: req.time,
        message: req.message,
        status: "pending".to_string(),
        created_at: Utc::now(),
    };

    BookingCrud::new(state.db.clone())
        .create(&booking)
        .await
        .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            message: "Appointment booked successfully",
            id: booking.id,
        }),
    ))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<BookingListResponse>, ApiError> {
    let bookings = BookingCrud::new(state.db.clone())
        .list_by_email(&auth.email)
        .await
        .map_err(internal)?;

    Ok(Json(BookingListResponse {
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<BookingListResponse>, ApiError> {
    let bookings = BookingCrud::new(state.db.clone())
        .list_all()
        .await
        .map_err(internal)?;

    Ok(Json(BookingListResponse {
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}
