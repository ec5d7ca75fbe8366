//! Store record models matching table schemas.
//!
//! These structs correspond directly to rows in the `services` and `bookings` tables (and to the
//! entries held by the in-memory store). They are distinct from the API models in
//! [`crate::api::models`] so the storage and wire representations can evolve independently.
//!
//! - [`services`]: catalog entries offered by the shop
//! - [`bookings`]: customer bookings, owned by an email address

pub mod bookings;
pub mod services;
