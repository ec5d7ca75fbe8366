//! Database repository for customer bookings.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::errors::Result;
use crate::db::models::bookings::{Booking, BookingCreateDBRequest, BookingFilter};
use crate::types::{BookingId, abbrev_uuid};

const BOOKING_COLUMNS: &str = "id, customer_name, email, date, service, service_id, price, img, status, created_at";

/// Repository for booking operations.
pub struct Bookings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bookings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), err)]
    pub async fn create(&mut self, request: &BookingCreateDBRequest) -> Result<Booking> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (customer_name, email, date, service, service_id, price, img)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(&request.customer_name)
        .bind(&request.email)
        .bind(&request.date)
        .bind(&request.service)
        .bind(&request.service_id)
        .bind(&request.price)
        .bind(&request.img)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(booking)
    }

    #[instrument(skip(self), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: BookingId) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(booking)
    }

    /// List bookings, oldest first. A `None` email in the filter matches every booking.
    #[instrument(skip(self, filter), err)]
    pub async fn list(&mut self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE ($1::text IS NULL OR email = $1)
            ORDER BY created_at, id
            "#
        ))
        .bind(filter.email.as_deref())
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }

    /// Set the status of a booking owned by `owner`. Returns `None` when no such booking exists.
    #[instrument(skip(self, owner), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn update_status(&mut self, id: BookingId, owner: &str, status: &str) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = $3
            WHERE id = $1 AND email = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(status)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(booking)
    }

    /// Delete a booking owned by `owner`. Returns whether a row was removed.
    #[instrument(skip(self, owner), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: BookingId, owner: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND email = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn booking_for(email: &str, service: &str) -> BookingCreateDBRequest {
        BookingCreateDBRequest {
            customer_name: "Customer".to_string(),
            email: email.to_string(),
            date: "2024-06-01".to_string(),
            service: service.to_string(),
            service_id: "02".to_string(),
            price: "150.00".to_string(),
            img: None,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_booking(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Bookings::new(&mut conn);

        let created = repo.create(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        assert_eq!(created.email, "a@x.com");
        assert!(created.status.is_none());

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_bookings_by_owner(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Bookings::new(&mut conn);

        let first = repo.create(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        repo.create(&booking_for("b@y.com", "Oil Change")).await.unwrap();
        let second = repo.create(&booking_for("a@x.com", "Wheel Alignment")).await.unwrap();

        let mine = repo.list(&BookingFilter::owned_by("a@x.com")).await.unwrap();
        assert_eq!(mine.iter().map(|b| b.id).collect::<Vec<_>>(), vec![first.id, second.id]);

        // Exact match only
        assert!(repo.list(&BookingFilter::owned_by("A@x.com")).await.unwrap().is_empty());

        assert_eq!(repo.list(&BookingFilter::default()).await.unwrap().len(), 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_status_is_owner_scoped(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Bookings::new(&mut conn);

        let booking = repo.create(&booking_for("a@x.com", "Engine Repair")).await.unwrap();

        assert!(repo.update_status(booking.id, "b@y.com", "confirm").await.unwrap().is_none());
        assert!(repo.get_by_id(booking.id).await.unwrap().unwrap().status.is_none());

        let updated = repo.update_status(booking.id, "a@x.com", "confirm").await.unwrap().unwrap();
        assert_eq!(updated.status.as_deref(), Some("confirm"));

        assert!(repo.update_status(Uuid::new_v4(), "a@x.com", "confirm").await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_is_owner_scoped(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Bookings::new(&mut conn);

        let booking = repo.create(&booking_for("a@x.com", "Engine Repair")).await.unwrap();

        assert!(!repo.delete(booking.id, "b@y.com").await.unwrap());
        assert!(repo.get_by_id(booking.id).await.unwrap().is_some());

        assert!(repo.delete(booking.id, "a@x.com").await.unwrap());
        assert!(repo.get_by_id(booking.id).await.unwrap().is_none());
        assert!(!repo.delete(booking.id, "a@x.com").await.unwrap());
    }
}
