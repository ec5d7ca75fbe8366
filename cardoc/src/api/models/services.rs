//! API models for the service catalog.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::services::{Facility, Service, ServiceSummary};
use crate::types::ServiceId;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityResponse {
    pub name: String,
    pub details: String,
}

impl From<Facility> for FacilityResponse {
    fn from(facility: Facility) -> Self {
        Self {
            name: facility.name,
            details: facility.details,
        }
    }
}

/// A full catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    #[serde(rename = "_id")]
    #[schema(value_type = String, format = "uuid")]
    pub id: ServiceId,
    pub service_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
    pub description: String,
    pub facility: Vec<FacilityResponse>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            service_id: service.service_id,
            title: service.title,
            img: service.img,
            price: service.price,
            description: service.description,
            facility: service.facility.0.into_iter().map(Into::into).collect(),
        }
    }
}

/// The projected view of a catalog entry returned by `GET /service/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceSummaryResponse {
    #[serde(rename = "_id")]
    #[schema(value_type = String, format = "uuid")]
    pub id: ServiceId,
    pub service_id: String,
    pub title: String,
    pub img: String,
    pub price: String,
}

impl From<ServiceSummary> for ServiceSummaryResponse {
    fn from(summary: ServiceSummary) -> Self {
        Self {
            id: summary.id,
            service_id: summary.service_id,
            title: summary.title,
            img: summary.img,
            price: summary.price,
        }
    }
}
