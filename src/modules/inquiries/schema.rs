use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::InquiryListing;

#[derive(Debug, Deserialize, Validate)]
pub struct InquiryRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InquiryCreatedResponse {
    pub message: &'static str,
    pub id: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct InquiryFilter {
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<InquiryListing> for InquiryResponse {
    fn from(i: InquiryListing) -> Self {
        Self {
            id: i.id,
            name: i.name,
            email: i.email,
            phone: i.phone,
            message: i.message,
            status: i.status,
            product_id: i.product_id,
            product_name: i.product_name,
            created_at: i.created_at,
        }
    }
}
