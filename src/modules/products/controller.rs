use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::{extractor::AdminUser, schema::ErrorResponse};
use crate::AppState;

use super::{
    crud::ProductCrud,
    model::Product,
    schema::{
        CategoryResponse, CreateProductRequest, Pagination, ProductListResponse, ProductQuery,
        ProductResponse,
    },
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "catalog request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let crud = ProductCrud::new(state.db.clone());
    let (products, total) = crud.list(&query).await.map_err(internal)?;

    let limit = query.limit();
    let pagination = Pagination {
        page: query.page(),
        limit,
        total,
        pages: (total + limit as i64 - 1) / limit as i64,
    };

    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
        pagination,
    }))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let crud = ProductCrud::new(state.db.clone());

    match crud.find_available_by_id(&id).await.map_err(internal)? {
        Some(product) => Ok(Json(ProductResponse::from(product))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Product not found")),
        )),
    }
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        description: req.description,
        price: req.price,
        images: encode_list(&req.images),
        colors: encode_list(&req.colors),
        sizes: encode_list(&req.sizes),
        tags: encode_list(&req.tags),
        category_id: req.category_id,
        subcategory_id: req.subcategory_id,
        featured: req.featured,
        available: req.available,
        stock: req.stock,
        sku: req.sku,
        created_at: now,
        updated_at: now,
    };

    let crud = ProductCrud::new(state.db.clone());
    crud.create(&product).await.map_err(internal)?;

    let listing = crud
        .find_by_id(&product.id)
        .await
        .map_err(internal)?
        .ok_or_else(|| internal("created product missing"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(listing))))
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let crud = ProductCrud::new(state.db.clone());
    let categories = crud.list_categories().await.map_err(internal)?;
    let subcategories = crud.list_subcategories().await.map_err(internal)?;

    Ok(Json(
        categories
            .into_iter()
            .map(|c| CategoryResponse::build(c, &subcategories))
            .collect(),
    ))
}

fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
