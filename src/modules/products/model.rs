use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Catalog row. The images/colors/sizes/tags columns hold JSON-encoded
/// string arrays; they are decoded at the response boundary and searched
/// with LIKE, which is good enough for a boutique-sized catalog.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: String,
    pub colors: String,
    pub sizes: String,
    pub tags: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub featured: bool,
    pub available: bool,
    pub stock: i32,
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product joined with its category names for list/detail responses.
#[derive(Debug, Clone, FromRow)]
pub struct ProductListing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: String,
    pub colors: String,
    pub sizes: String,
    pub tags: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub featured: bool,
    pub available: bool,
    pub stock: i32,
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: String,
    pub category_slug: String,
    pub subcategory_name: Option<String>,
    pub subcategory_slug: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
}
