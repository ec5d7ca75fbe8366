//! Ownership Guard.
//!
//! [`OwnerScope`] is built from a verified [`Principal`] and the optional `?email=` owner key.
//! Any owner key other than the principal's own email is rejected with 403 before the handler
//! runs. The same rule is applied to stored bookings with [`OwnerScope::ensure_owns`].

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tracing::{debug, instrument};

use crate::{
    AppState,
    api::models::{auth::Principal, bookings::ListBookingsQuery},
    db::models::bookings::{Booking, BookingFilter},
    errors::Error,
    types::Operation,
};

#[derive(Debug, Clone)]
pub struct OwnerScope {
    principal: Principal,
    requested: Option<String>,
}

impl OwnerScope {
    /// Check a requested owner key against the principal.
    pub fn new(principal: Principal, requested: Option<String>) -> Result<Self, Error> {
        let scope = Self { principal, requested: None };
        if let Some(owner) = requested.as_deref() {
            scope.authorize(owner, Operation::Read)?;
        }
        Ok(Self { requested, ..scope })
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Store filter for a listing. Without an explicit owner key the listing is limited to the
    /// principal unless `allow_unscoped` is set.
    pub fn filter(&self, allow_unscoped: bool) -> BookingFilter {
        match &self.requested {
            Some(owner) => BookingFilter::owned_by(owner.clone()),
            None if allow_unscoped => BookingFilter::default(),
            None => BookingFilter::owned_by(self.principal.email.clone()),
        }
    }

    /// Reject `action` on resources owned by anyone but the principal. Exact match, no case folding.
    pub fn authorize(&self, owner_email: &str, action: Operation) -> Result<(), Error> {
        if owner_email == self.principal.email {
            return Ok(());
        }
        debug!("{} attempted to {action} resources of {owner_email}", self.principal.email);
        // The owner stays in the log; the response must not reveal it
        Err(Error::Forbidden {
            action,
            resource: "another customer's bookings".to_string(),
        })
    }

    pub fn ensure_owns(&self, booking: &Booking, action: Operation) -> Result<(), Error> {
        self.authorize(&booking.email, action)
    }
}

impl FromRequestParts<AppState> for OwnerScope {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        let Query(query) = Query::<ListBookingsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::BadRequest { message: e.body_text() })?;
        OwnerScope::new(principal, query.email)
    }
}
