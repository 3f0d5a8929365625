use crate::config::DbPool;

use super::model::{Inquiry, InquiryListing};

pub struct InquiryCrud {
    pool: DbPool,
}

impl InquiryCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, inquiry: &Inquiry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO inquiries (id, user_id, product_id, name, email, phone, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&inquiry.id)
        .bind(&inquiry.user_id)
        .bind(&inquiry.product_id)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(&inquiry.status)
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list(
        &self,
        product_id: Option<&str>,
    ) -> Result<Vec<InquiryListing>, sqlx::Error> {
        let base = r#"
            SELECT i.id, i.user_id, i.product_id, i.name, i.email, i.phone, i.message,
                   i.status, i.created_at, p.name AS product_name
            FROM inquiries i
            LEFT JOIN products p ON p.id = i.product_id
        "#;

        match product_id {
            Some(product_id) => {
                sqlx::query_as::<_, InquiryListing>(&format!(
                    "{base} WHERE i.product_id = ? ORDER BY i.created_at DESC"
                ))
                .bind(product_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, InquiryListing>(&format!(
                    "{base} ORDER BY i.created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    pub async fn product_name(&self, product_id: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT name FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(name,)| name))
    }
}
