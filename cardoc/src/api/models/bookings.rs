//! API request/response models for bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::bookings::{Booking, BookingCreateDBRequest};
use crate::errors::Error;
use crate::types::BookingId;

// Booking request models.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    #[serde(default, alias = "customer_name")]
    pub customer_name: String,
    // Absent required fields become empty strings and are rejected with 400 by `into_db_request`
    /// Owner email; must match the authenticated principal
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, rename = "service_id")]
    pub service_id: String,
    #[serde(default)]
    pub price: String,
    pub img: Option<String>,
}

impl BookingCreate {
    /// Check required fields and convert into a store insert request.
    pub fn into_db_request(self) -> Result<BookingCreateDBRequest, Error> {
        for (field, value) in [
            ("email", &self.email),
            ("date", &self.date),
            ("service", &self.service),
            ("service_id", &self.service_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::BadRequest {
                    message: format!("Field '{field}' is required"),
                });
            }
        }

        Ok(BookingCreateDBRequest {
            customer_name: self.customer_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date: self.date,
            service: self.service,
            service_id: self.service_id,
            price: self.price,
            img: self.img.filter(|img| !img.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingStatusUpdate {
    #[serde(default)]
    pub status: String,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListBookingsQuery {
    /// Owner email to list bookings for. Must be the caller's own email.
    pub email: Option<String>,
}

// Booking response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(rename = "_id")]
    #[schema(value_type = String, format = "uuid")]
    pub id: BookingId,
    pub customer_name: String,
    pub email: String,
    pub date: String,
    pub service: String,
    #[serde(rename = "service_id")]
    pub service_id: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            customer_name: booking.customer_name,
            email: booking.email,
            date: booking.date,
            service: booking.service,
            service_id: booking.service_id,
            price: booking.price,
            img: booking.img,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

/// Acknowledgement of an insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    #[schema(value_type = String, format = "uuid")]
    pub inserted_id: BookingId,
}

/// Acknowledgement of a status update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Acknowledgement of a delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}
