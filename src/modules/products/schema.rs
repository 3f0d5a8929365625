use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Category, ProductListing, Subcategory};

// =============================================================================
// LISTING / FILTERING
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    /// Comma-separated category slugs.
    pub categories: Option<String>,
    /// Comma-separated subcategory slugs.
    pub subcategories: Option<String>,
    /// Comma-separated color names.
    pub colors: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub featured: Option<bool>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub category: CategoryRef,
    pub subcategory: Option<CategoryRef>,
    pub featured: bool,
    pub available: bool,
    pub stock: i32,
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductListing> for ProductResponse {
    fn from(p: ProductListing) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            images: parse_json_list(&p.images),
            colors: parse_json_list(&p.colors),
            sizes: parse_json_list(&p.sizes),
            tags: parse_json_list(&p.tags),
            category: CategoryRef {
                name: p.category_name,
                slug: p.category_slug,
            },
            subcategory: match (p.subcategory_name, p.subcategory_slug) {
                (Some(name), Some(slug)) => Some(CategoryRef { name, slug }),
                _ => None,
            },
            featured: p.featured,
            available: p.available,
            stock: p.stock,
            sku: p.sku,
            created_at: p.created_at,
        }
    }
}

fn parse_json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
}

// =============================================================================
// ADMIN CREATE
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub stock: i32,
    pub sku: Option<String>,
}

fn default_available() -> bool {
    true
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SubcategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub subcategories: Vec<SubcategoryResponse>,
}

impl CategoryResponse {
    pub fn build(category: Category, subcategories: &[Subcategory]) -> Self {
        let subcategories = subcategories
            .iter()
            .filter(|s| s.category_id == category.id)
            .map(|s| SubcategoryResponse {
                id: s.id.clone(),
                name: s.name.clone(),
                slug: s.slug.clone(),
                description: s.description.clone(),
            })
            .collect();

        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            subcategories,
        }
    }
}
