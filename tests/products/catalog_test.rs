use axum::http::StatusCode;
use serial_test::serial;
use sqlx::{MySql, Pool};
use uuid::Uuid;

use crate::common::TestContext;

pub async fn seed_category(db: &Pool<MySql>, name: &str) -> (String, String) {
    let id = Uuid::new_v4().to_string();
    let slug = format!("{}-{}", name.to_lowercase().replace(' ', "-"), &id[..8]);
    sqlx::query("INSERT INTO categories (id, name, slug) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(&slug)
        .execute(db)
        .await
        .expect("failed to seed category");
    (id, slug)
}

pub struct SeedProduct<'a> {
    pub name: &'a str,
    pub price: &'a str,
    pub colors: &'a [&'a str],
    pub featured: bool,
    pub available: bool,
}

impl Default for SeedProduct<'_> {
    fn default() -> Self {
        Self {
            name: "Silk Scarf",
            price: "49.99",
            colors: &[],
            featured: false,
            available: true,
        }
    }
}

pub async fn seed_product(db: &Pool<MySql>, category_id: &str, spec: SeedProduct<'_>) -> String {
    let id = Uuid::new_v4().to_string();
    let colors = serde_json::to_string(spec.colors).unwrap();
    sqlx::query(
        "INSERT INTO products \
         (id, name, description, price, images, colors, sizes, tags, category_id, featured, available, stock) \
         VALUES (?, ?, ?, ?, '[]', ?, '[]', '[]', ?, ?, ?, 5)",
    )
    .bind(&id)
    .bind(spec.name)
    .bind(format!("{} description", spec.name))
    .bind(spec.price)
    .bind(colors)
    .bind(category_id)
    .bind(spec.featured)
    .bind(spec.available)
    .execute(db)
    .await
    .expect("failed to seed product");
    id
}

#[tokio::test]
#[serial]
async fn list_returns_products_with_pagination() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    for name in ["Scarf One", "Scarf Two", "Scarf Three"] {
        seed_product(
            &ctx.db,
            &category_id,
            SeedProduct { name, ..Default::default() },
        )
        .await;
    }

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("limit", "2")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["pagination"]["page"], 1);

    let page_two = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("limit", "2")
        .add_query_param("page", "2")
        .await;
    let body: serde_json::Value = page_two.json();
    assert_eq!(body["products"].as_array().unwrap().len(), 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn search_matches_product_name() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Velvet Clutch", ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Linen Tote", ..Default::default() },
    )
    .await;

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("search", "velvet")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Velvet Clutch");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn price_range_filter_applies() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Cheap Pin", price: "10.00", ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Mid Belt", price: "80.00", ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Gold Brooch", price: "450.00", ..Default::default() },
    )
    .await;

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("min_price", "50")
        .add_query_param("max_price", "100")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Mid Belt");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn color_filter_matches_json_array() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Red Scarf", colors: &["red", "black"], ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Blue Scarf", colors: &["blue"], ..Default::default() },
    )
    .await;

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("colors", "red")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Red Scarf");
    assert_eq!(products[0]["colors"], serde_json::json!(["red", "black"]));

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn featured_filter_and_price_sort() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Plain Hat", price: "30.00", ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Star Hat", price: "90.00", featured: true, ..Default::default() },
    )
    .await;
    seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Moon Hat", price: "60.00", featured: true, ..Default::default() },
    )
    .await;

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .add_query_param("featured", "true")
        .add_query_param("sort_by", "price-low")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Moon Hat");
    assert_eq!(products[1]["name"], "Star Hat");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn unavailable_products_are_hidden() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Accessories").await;
    let product_id = seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Sold Out Bag", available: false, ..Default::default() },
    )
    .await;

    let response = ctx
        .server
        .get("/products")
        .add_query_param("categories", &slug)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["products"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 0);

    // Fetching the id directly must not bypass the listing filter.
    let detail = ctx.server.get(&format!("/products/{product_id}")).await;
    detail.assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn get_product_by_id_includes_category_name() {
    let ctx = TestContext::new().await;
    let (category_id, _slug) = seed_category(&ctx.db, "Accessories").await;
    let product_id = seed_product(
        &ctx.db,
        &category_id,
        SeedProduct { name: "Silk Scarf", ..Default::default() },
    )
    .await;

    let response = ctx.server.get(&format!("/products/{product_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Silk Scarf");
    assert_eq!(body["category"]["name"], "Accessories");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn get_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get(&format!("/products/{}", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn categories_listing_includes_subcategories() {
    let ctx = TestContext::new().await;
    let (category_id, slug) = seed_category(&ctx.db, "Clothing").await;
    sqlx::query(
        "INSERT INTO subcategories (id, category_id, name, slug) VALUES (?, ?, 'Dresses', 'dresses')",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&category_id)
    .execute(&ctx.db)
    .await
    .unwrap();

    let response = ctx.server.get("/categories").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let category = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["slug"] == slug.as_str())
        .expect("seeded category present");
    assert_eq!(category["name"], "Clothing");
    assert_eq!(category["subcategories"][0]["name"], "Dresses");

    ctx.cleanup().await;
}
