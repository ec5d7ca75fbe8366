//! PostgreSQL-backed [`DocumentStore`].

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::DocumentStore;
use crate::config::PoolSettings;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::{Bookings, Services};
use crate::db::models::{
    bookings::{Booking, BookingCreateDBRequest, BookingFilter},
    services::{Service, ServiceCreateDBRequest, ServiceSummary},
};
use crate::types::{BookingId, ServiceId};

/// Get the cardoc database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Store handle wrapping a connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect with the given pool settings and bring the schema up to date.
    #[instrument(skip_all, err)]
    pub async fn connect(url: &str, settings: &PoolSettings) -> Result<Self> {
        let mut options = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs));

        // 0 means "never" for both timeouts
        if settings.idle_timeout_secs > 0 {
            options = options.idle_timeout(Duration::from_secs(settings.idle_timeout_secs));
        }
        if settings.max_lifetime_secs > 0 {
            options = options.max_lifetime(Duration::from_secs(settings.max_lifetime_secs));
        }

        let pool = options.connect(url).await?;
        migrator().run(&pool).await?;
        info!("Connected to PostgreSQL store and applied migrations");

        Ok(Self { pool })
    }

    /// Wrap an already migrated pool
    #[cfg(test)]
    pub(crate) fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool.acquire().await.map_err(DbError::from)
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn list_services(&self) -> Result<Vec<Service>> {
        let mut conn = self.acquire().await?;
        Services::new(&mut conn).list().await
    }

    async fn get_service(&self, id: ServiceId) -> Result<Option<ServiceSummary>> {
        let mut conn = self.acquire().await?;
        Services::new(&mut conn).get_summary(id).await
    }

    async fn insert_service(&self, request: &ServiceCreateDBRequest) -> Result<Service> {
        let mut conn = self.acquire().await?;
        Services::new(&mut conn).create(request).await
    }

    async fn insert_booking(&self, request: &BookingCreateDBRequest) -> Result<Booking> {
        let mut conn = self.acquire().await?;
        Bookings::new(&mut conn).create(request).await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut conn = self.acquire().await?;
        Bookings::new(&mut conn).list(filter).await
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        let mut conn = self.acquire().await?;
        Bookings::new(&mut conn).get_by_id(id).await
    }

    async fn update_booking_status(&self, id: BookingId, owner: &str, status: &str) -> Result<Option<Booking>> {
        let mut conn = self.acquire().await?;
        Bookings::new(&mut conn).update_status(id, owner, status).await
    }

    async fn delete_booking(&self, id: BookingId, owner: &str) -> Result<bool> {
        let mut conn = self.acquire().await?;
        Bookings::new(&mut conn).delete(id, owner).await
    }

    async fn close(&self) {
        info!("Closing database connections...");
        self.pool.close().await;
    }
}
