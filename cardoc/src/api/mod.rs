//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - **Session** (`/jwt`, `/logout`): issue and clear the session cookie
//! - **Catalog** (`/services`, `/service/{id}`): public, read-only
//! - **Bookings** (`/bookings/*`): authenticated, scoped to the caller's email
//!
//! All endpoints are documented with `utoipa`; the document is served at
//! `/api-docs/openapi.json` and rendered at `/docs`.

pub mod handlers;
pub mod models;
