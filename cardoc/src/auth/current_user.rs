//! [`Principal`] extractor.
//!
//! Handlers name `Principal` to require an authenticated caller. Behind [`require_session`] the
//! extractor reuses the principal the middleware already verified; anywhere else it runs
//! [`authenticate`] itself, so a handler taking `Principal` can never run unauthenticated.
//!
//! [`require_session`]: super::middleware::require_session

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

use crate::{
    AppState,
    api::models::auth::Principal,
    auth::middleware::{Verified, authenticate},
    errors::Error,
};

impl FromRequestParts<AppState> for Principal {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(Verified(principal)) = parts.extensions.get::<Verified>() {
            return Ok(principal.clone());
        }

        let principal = authenticate(&parts.headers, &state.config)?;
        parts.extensions.insert(Verified(principal.clone()));
        Ok(principal)
    }
}
