//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Authentication and ownership checks, through the [`crate::auth`] extractors
//! - A single store operation via [`crate::db::DocumentStore`]
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: session cookie issuing and logout
//! - [`services`]: service catalog listing and lookup
//! - [`bookings`]: booking creation, listing, status updates and cancellation
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which converts to the appropriate HTTP status code and
//! a client-safe message.

pub mod auth;
pub mod bookings;
pub mod services;
