use crate::config::DbPool;

use super::model::ContactMessage;

pub struct ContactCrud {
    pool: DbPool,
}

impl ContactCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, entry: &ContactMessage) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, phone, subject, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(&entry.phone)
        .bind(&entry.subject)
        .bind(&entry.message)
        .bind(&entry.status)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages WHERE email = ? ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}
