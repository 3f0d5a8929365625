use crate::config::DbPool;

use super::model::Booking;

pub struct BookingCrud {
    pool: DbPool,
}

impl BookingCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, booking: &Booking) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, name, email, phone, date, time, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.date)
        .bind(&booking.time)
        .bind(&booking.message)
        .bind(&booking.status)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE email = ? ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }
}
