use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Inquiry {
    pub id: String,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Inquiry joined with the product it refers to, when any.
#[derive(Debug, Clone, FromRow)]
pub struct InquiryListing {
    pub id: String,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub product_name: Option<String>,
}
