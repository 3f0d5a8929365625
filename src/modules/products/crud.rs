use sqlx::{MySql, QueryBuilder};

use crate::config::DbPool;

use super::model::{Category, Product, ProductListing, Subcategory};
use super::schema::ProductQuery;

const LISTING_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.price, p.images, p.colors, p.sizes, p.tags,
           p.category_id, p.subcategory_id, p.featured, p.available, p.stock, p.sku,
           p.created_at, p.updated_at,
           c.name AS category_name, c.slug AS category_slug,
           sc.name AS subcategory_name, sc.slug AS subcategory_slug
    FROM products p
    JOIN categories c ON c.id = p.category_id
    LEFT JOIN subcategories sc ON sc.id = p.subcategory_id
"#;

const COUNT_SELECT: &str = r#"
    SELECT COUNT(*)
    FROM products p
    JOIN categories c ON c.id = p.category_id
    LEFT JOIN subcategories sc ON sc.id = p.subcategory_id
"#;

pub struct ProductCrud {
    pool: DbPool,
}

impl ProductCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        query: &ProductQuery,
    ) -> Result<(Vec<ProductListing>, i64), sqlx::Error> {
        let mut count_builder = QueryBuilder::<MySql>::new(COUNT_SELECT);
        push_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder = QueryBuilder::<MySql>::new(LISTING_SELECT);
        push_filters(&mut builder, query);
        builder.push(order_clause(query.sort_by.as_deref()));

        let limit = query.limit();
        let offset = (query.page() - 1) * limit;
        builder.push(" LIMIT ");
        builder.push_bind(limit as i64);
        builder.push(" OFFSET ");
        builder.push_bind(offset as i64);

        let products = builder
            .build_query_as::<ProductListing>()
            .fetch_all(&self.pool)
            .await?;

        Ok((products, total))
    }

    /// Detail lookup for the public endpoint. Hidden products stay hidden
    /// here too, like in the listing.
    pub async fn find_available_by_id(
        &self,
        id: &str,
    ) -> Result<Option<ProductListing>, sqlx::Error> {
        let mut builder = QueryBuilder::<MySql>::new(LISTING_SELECT);
        builder.push(" WHERE p.available = TRUE AND p.id = ");
        builder.push_bind(id.to_string());

        builder
            .build_query_as::<ProductListing>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Unfiltered lookup; used when echoing back a just-created product,
    /// which may well be unavailable still.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ProductListing>, sqlx::Error> {
        let mut builder = QueryBuilder::<MySql>::new(LISTING_SELECT);
        builder.push(" WHERE p.id = ");
        builder.push_bind(id.to_string());

        builder
            .build_query_as::<ProductListing>()
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, description, price, images, colors, sizes, tags,
                 category_id, subcategory_id, featured, available, stock, sku,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.images)
        .bind(&product.colors)
        .bind(&product.sizes)
        .bind(&product.tags)
        .bind(&product.category_id)
        .bind(&product.subcategory_id)
        .bind(product.featured)
        .bind(product.available)
        .bind(product.stock)
        .bind(&product.sku)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, sort_order FROM categories ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_subcategories(&self) -> Result<Vec<Subcategory>, sqlx::Error> {
        sqlx::query_as::<_, Subcategory>(
            "SELECT id, category_id, name, slug, description, sort_order \
             FROM subcategories ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &ProductQuery) {
    builder.push(" WHERE p.available = TRUE");

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        builder.push(" AND (p.name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR p.description LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR p.tags LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    push_slug_filter(builder, "c.slug", query.categories.as_deref());
    push_slug_filter(builder, "sc.slug", query.subcategories.as_deref());

    if let Some(colors) = query.colors.as_deref() {
        let colors: Vec<&str> = colors.split(',').filter(|c| !c.is_empty()).collect();
        if !colors.is_empty() {
            builder.push(" AND (");
            for (i, color) in colors.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                // Colors are stored as a JSON array string; match the quoted
                // element to avoid `red` hitting `dark-red`.
                builder.push("p.colors LIKE ");
                builder.push_bind(format!("%\"{color}\"%"));
            }
            builder.push(")");
        }
    }

    if let Some(min) = query.min_price {
        builder.push(" AND p.price >= ");
        builder.push_bind(min);
    }

    if let Some(max) = query.max_price {
        builder.push(" AND p.price <= ");
        builder.push_bind(max);
    }

    if query.featured == Some(true) {
        builder.push(" AND p.featured = TRUE");
    }
}

fn push_slug_filter(builder: &mut QueryBuilder<'_, MySql>, column: &str, slugs: Option<&str>) {
    let Some(slugs) = slugs else { return };
    let slugs: Vec<&str> = slugs.split(',').filter(|s| !s.is_empty()).collect();
    if slugs.is_empty() {
        return;
    }

    builder.push(format!(" AND {column} IN ("));
    let mut separated = builder.separated(", ");
    for slug in slugs {
        separated.push_bind(slug.to_string());
    }
    builder.push(")");
}

fn order_clause(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("oldest") => " ORDER BY p.created_at ASC",
        Some("price-low") => " ORDER BY p.price ASC",
        Some("price-high") => " ORDER BY p.price DESC",
        Some("name") => " ORDER BY p.name ASC",
        _ => " ORDER BY p.created_at DESC",
    }
}
