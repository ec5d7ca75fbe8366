//! Store models for the service catalog.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::types::ServiceId;

/// One line of the "what's included" list on a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub details: String,
}

/// Full catalog entry as stored.
#[derive(Debug, Clone, FromRow)]
pub struct Service {
    pub id: ServiceId,
    /// Shop-facing catalog number (e.g. "01"), distinct from the store id
    pub service_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
    pub description: String,
    pub facility: Json<Vec<Facility>>,
}

/// Projection used by the single-service lookup: only what the checkout page needs.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ServiceSummary {
    pub id: ServiceId,
    pub service_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
}

impl From<Service> for ServiceSummary {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            service_id: service.service_id,
            title: service.title,
            img: service.img,
            price: service.price,
        }
    }
}

/// Insert request used when seeding the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreateDBRequest {
    pub service_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub facility: Vec<Facility>,
}
