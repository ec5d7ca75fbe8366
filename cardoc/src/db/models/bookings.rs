//! Store models for customer bookings.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::BookingId;

/// Booking as stored. `email` is the owner key compared by the ownership guard.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Booking {
    pub id: BookingId,
    pub customer_name: String,
    pub email: String,
    pub date: String,
    pub service: String,
    pub service_id: String,
    pub price: String,
    pub img: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BookingCreateDBRequest {
    pub customer_name: String,
    pub email: String,
    pub date: String,
    pub service: String,
    pub service_id: String,
    pub price: String,
    pub img: Option<String>,
}

/// Filter for listing bookings. `None` lists every booking in the store.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub email: Option<String>,
}

impl BookingFilter {
    pub fn owned_by(email: impl Into<String>) -> Self {
        Self { email: Some(email.into()) }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.email.as_deref().is_none_or(|email| booking.email == email)
    }
}
