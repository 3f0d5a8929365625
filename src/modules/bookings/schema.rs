use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::Booking;

#[derive(Debug, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone is required"))]
    pub phone: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 16, message = "Time is required"))]
    pub time: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub message: &'static str,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.name,
            email: b.email,
            phone: b.phone,
            date: b.date,
            time: b.time,
            message: b.message,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
}
