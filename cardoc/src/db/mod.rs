//! Document store layer.
//!
//! The rest of the application talks to storage only through the [`DocumentStore`] trait, a
//! handle that is constructed once at startup ([`create_store`]) and injected into every handler
//! through [`crate::AppState`]. Two implementations exist:
//!
//! - [`postgres::PostgresStore`]: SQLx/PostgreSQL, one table per collection, using the
//!   repositories in [`handlers`]
//! - [`memory::MemoryStore`]: process-local maps, for tests and local development
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │DocumentStore│  (PostgresStore | MemoryStore)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers, Postgres only)
//! └─────────────┘
//! ```
//!
//! Every trait method is a single logical store operation; there are no cross-call transactions.

use anyhow::Context;
use async_trait::async_trait;
use std::{path::Path, sync::Arc};
use tracing::{info, instrument};

use crate::config::{Config, DatabaseConfig};
use crate::types::{BookingId, ServiceId};
use errors::Result;
use models::{
    bookings::{Booking, BookingCreateDBRequest, BookingFilter},
    services::{Service, ServiceCreateDBRequest, ServiceSummary},
};

pub mod errors;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;

/// Storage operations over the `services` and `bookings` collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every catalog entry
    async fn list_services(&self) -> Result<Vec<Service>>;

    /// Fetch the projected summary of a single catalog entry
    async fn get_service(&self, id: ServiceId) -> Result<Option<ServiceSummary>>;

    /// Add a catalog entry (used for seeding)
    async fn insert_service(&self, request: &ServiceCreateDBRequest) -> Result<Service>;

    /// Insert a booking, returning it with its store-assigned id
    async fn insert_booking(&self, request: &BookingCreateDBRequest) -> Result<Booking>;

    /// List bookings matching the filter
    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>>;

    /// Fetch one booking by id
    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Update the status of the booking with `id` if, and only if, it is owned by `owner`
    async fn update_booking_status(&self, id: BookingId, owner: &str, status: &str) -> Result<Option<Booking>>;

    /// Delete the booking with `id` if, and only if, it is owned by `owner`
    async fn delete_booking(&self, id: BookingId, owner: &str) -> Result<bool>;

    /// Release any connections held by the store
    async fn close(&self) {}
}

/// Build the store described by the configuration.
///
/// For Postgres this connects, runs migrations and returns once the pool is usable. Either store
/// is then seeded from `seed_services` if configured.
pub async fn create_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match &config.database {
        DatabaseConfig::External { url, pool, .. } => Arc::new(postgres::PostgresStore::connect(url, pool).await?),
        DatabaseConfig::Memory { .. } => Arc::new(memory::MemoryStore::new()),
    };

    if let Some(path) = config.database.seed_services() {
        seed_catalog(store.as_ref(), path).await?;
    }
    Ok(store)
}

/// Load catalog entries from a JSON array of services, unless the catalog already has entries.
///
/// Returns the number of entries inserted.
#[instrument(skip(store), err)]
pub async fn seed_catalog(store: &dyn DocumentStore, path: &Path) -> anyhow::Result<usize> {
    if !store.list_services().await?.is_empty() {
        info!("Service catalog already populated, skipping seed file {}", path.display());
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read service seed file {}", path.display()))?;
    let services: Vec<ServiceCreateDBRequest> =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse service seed file {}", path.display()))?;

    for service in &services {
        store.insert_service(service).await?;
    }
    info!("Seeded {} services from {}", services.len(), path.display());
    Ok(services.len())
}
