//! Process-local [`DocumentStore`] backed by concurrent maps.
//!
//! Used by the test-suite and by `database.type: memory` for running the server without
//! PostgreSQL. Data does not survive a restart; see [`super::seed_catalog`] for preloading the
//! catalog.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sqlx::types::Json;
use uuid::Uuid;

use super::DocumentStore;
use crate::db::errors::Result;
use crate::db::models::{
    bookings::{Booking, BookingCreateDBRequest, BookingFilter},
    services::{Service, ServiceCreateDBRequest, ServiceSummary},
};
use crate::types::{BookingId, ServiceId};

#[derive(Default)]
pub struct MemoryStore {
    services: DashMap<ServiceId, Service>,
    bookings: DashMap<BookingId, Booking>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bookings currently held.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_services(&self) -> Result<Vec<Service>> {
        let mut services: Vec<Service> = self.services.iter().map(|entry| entry.value().clone()).collect();
        services.sort_by(|a, b| a.service_id.cmp(&b.service_id).then(a.id.cmp(&b.id)));
        Ok(services)
    }

    async fn get_service(&self, id: ServiceId) -> Result<Option<ServiceSummary>> {
        Ok(self.services.get(&id).map(|entry| ServiceSummary::from(entry.value().clone())))
    }

    async fn insert_service(&self, request: &ServiceCreateDBRequest) -> Result<Service> {
        let service = Service {
            id: Uuid::new_v4(),
            service_id: request.service_id.clone(),
            title: request.title.clone(),
            img: request.img.clone(),
            price: request.price.clone(),
            description: request.description.clone(),
            facility: Json(request.facility.clone()),
        };
        self.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn insert_booking(&self, request: &BookingCreateDBRequest) -> Result<Booking> {
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_name: request.customer_name.clone(),
            email: request.email.clone(),
            date: request.date.clone(),
            service: request.service.clone(),
            service_id: request.service_id.clone(),
            price: request.price.clone(),
            img: request.img.clone(),
            status: None,
            created_at: Utc::now(),
        };
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        bookings.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_booking_status(&self, id: BookingId, owner: &str, status: &str) -> Result<Option<Booking>> {
        let Some(mut entry) = self.bookings.get_mut(&id) else {
            return Ok(None);
        };
        if entry.email != owner {
            return Ok(None);
        }
        entry.status = Some(status.to_string());
        Ok(Some(entry.clone()))
    }

    async fn delete_booking(&self, id: BookingId, owner: &str) -> Result<bool> {
        Ok(self.bookings.remove_if(&id, |_, booking| booking.email == owner).is_some())
    }
}
