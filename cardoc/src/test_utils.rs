//! Shared constructors for tests.

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::TestServer;
use std::sync::Arc;

use crate::{
    AppState,
    api::models::auth::Principal,
    auth::{cookie, session},
    config::{Config, DatabaseConfig},
    db::{
        DocumentStore,
        errors::{DbError, Result},
        memory::MemoryStore,
        models::{
            bookings::{Booking, BookingCreateDBRequest, BookingFilter},
            services::{Service, ServiceCreateDBRequest, ServiceSummary},
        },
    },
    types::{BookingId, ServiceId},
};

pub fn create_test_config() -> Config {
    Config {
        secret_key: Some("test-secret-key-for-jwt".to_string()),
        database: DatabaseConfig::Memory { seed_services: None },
        ..Default::default()
    }
}

/// State over an empty in-memory store. The store is returned separately so tests can seed and
/// inspect it.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::builder().store(store.clone()).config(create_test_config()).build();
    (state, store)
}

/// Test server over the full application router
pub fn create_test_server(state: AppState) -> TestServer {
    let router = crate::build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

/// `Cookie` header value carrying a freshly issued session for `email`
pub fn session_cookie_for(email: &str, config: &Config) -> HeaderValue {
    let principal = Principal { email: email.to_string() };
    let token = session::create_session_token(&principal, config).expect("Failed to create session token");
    let set_cookie = cookie::session_cookie(&token, &config.auth.session);
    let pair = set_cookie.split(';').next().expect("cookie has a name=value pair");
    HeaderValue::from_str(pair).expect("cookie is a valid header value")
}

/// Store whose every operation fails as if the backend were unreachable
pub struct UnreachableStore;

fn unreachable<T>() -> Result<T> {
    Err(DbError::Other(anyhow::anyhow!("connection refused to 10.0.0.3:5432")))
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn list_services(&self) -> Result<Vec<Service>> {
        unreachable()
    }

    async fn get_service(&self, _id: ServiceId) -> Result<Option<ServiceSummary>> {
        unreachable()
    }

    async fn insert_service(&self, _request: &ServiceCreateDBRequest) -> Result<Service> {
        unreachable()
    }

    async fn insert_booking(&self, _request: &BookingCreateDBRequest) -> Result<Booking> {
        unreachable()
    }

    async fn list_bookings(&self, _filter: &BookingFilter) -> Result<Vec<Booking>> {
        unreachable()
    }

    async fn get_booking(&self, _id: BookingId) -> Result<Option<Booking>> {
        unreachable()
    }

    async fn update_booking_status(&self, _id: BookingId, _owner: &str, _status: &str) -> Result<Option<Booking>> {
        unreachable()
    }

    async fn delete_booking(&self, _id: BookingId, _owner: &str) -> Result<bool> {
        unreachable()
    }
}
