//! Token Verifier request stage.
//!
//! [`authenticate`] is the one place a request's credential is checked. It is exposed to the
//! router as [`require_session`], layered over the booking routes, and reused by the
//! [`Principal`] extractor in [`super::current_user`].

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, trace};

use crate::{
    AppState,
    api::models::auth::Principal,
    auth::{cookie::session_tokens, session::verify_session_token},
    config::Config,
    errors::{AuthFailure, Error},
};

/// Principal attached to the request extensions by [`require_session`]. Only this module can
/// construct it, so its presence proves the credential was verified.
#[derive(Debug, Clone)]
pub(crate) struct Verified(pub(crate) Principal);

/// Verify the session cookie on a request.
///
/// - no session cookie (or only empty ones): [`AuthFailure::MissingCredential`]
/// - cookies present but none verifies: [`AuthFailure::InvalidCredential`]
///
/// When several session cookies are sent, the first that verifies wins. No I/O happens here.
pub fn authenticate(headers: &HeaderMap, config: &Config) -> Result<Principal, Error> {
    let mut attempted = false;

    for token in session_tokens(headers, &config.auth.session.cookie_name) {
        attempted = true;
        match verify_session_token(token, config) {
            Ok(principal) => {
                trace!("Verified session for {}", principal.email);
                return Ok(principal);
            }
            Err(e @ Error::Internal { .. }) => return Err(e),
            Err(_) => continue,
        }
    }

    let reason = if attempted {
        AuthFailure::InvalidCredential
    } else {
        AuthFailure::MissingCredential
    };
    debug!("Rejecting request: {reason}");
    Err(Error::Unauthenticated { reason })
}

/// Middleware that rejects unauthenticated requests with 401 before any handler runs.
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, Error> {
    let principal = authenticate(request.headers(), &state.config)?;
    request.extensions_mut().insert(Verified(principal));
    Ok(next.run(request).await)
}
