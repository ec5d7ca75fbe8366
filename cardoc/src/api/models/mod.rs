//! API request and response data models.
//!
//! API models are distinct from the store models in [`crate::db::models`]. Field names follow
//! the JSON the shop's web client already speaks (`_id`, `customerName`, `insertedId`, ...).
//!
//! - [`auth`]: the authenticated principal and session payloads
//! - [`services`]: catalog entries
//! - [`bookings`]: booking payloads and write acknowledgements

pub mod auth;
pub mod bookings;
pub mod services;
