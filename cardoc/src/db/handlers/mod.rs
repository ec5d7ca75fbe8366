//! Postgres repositories for each store collection.
//!
//! Each repository wraps a borrowed SQLx connection (or transaction) and exposes strongly typed
//! queries returning models from [`crate::db::models`]. They are used by
//! [`crate::db::postgres::PostgresStore`], which acquires a connection per operation.
//!
//! ```ignore
//! let mut conn = pool.acquire().await?;
//! let mut repo = Bookings::new(&mut conn);
//! let mine = repo.list(&BookingFilter::owned_by("a@x.com")).await?;
//! ```

pub mod bookings;
pub mod services;

pub use bookings::Bookings;
pub use services::Services;
