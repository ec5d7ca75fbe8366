use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::auth::{Principal, SessionResponse, SuccessResponse, TokenRequest},
    auth::{cookie, session},
    errors::Error,
};

/// Issue a session cookie for the given email
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = TokenRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse,
            headers(("set-cookie" = String, description = "HTTP-only session cookie"))),
        (status = 400, description = "Missing email"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn issue_token(State(state): State<AppState>, Json(request): Json<TokenRequest>) -> Result<SessionResponse, Error> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(Error::BadRequest {
            message: "Field 'email' is required".to_string(),
        });
    }

    let principal = Principal { email: email.to_string() };
    let token = session::create_session_token(&principal, &state.config)?;
    tracing::debug!("Issued session for {}", principal.email);

    Ok(SessionResponse {
        body: SuccessResponse { success: true },
        cookie: cookie::session_cookie(&token, &state.config.auth.session),
    })
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> SessionResponse {
    SessionResponse {
        body: SuccessResponse { success: true },
        cookie: cookie::clear_session_cookie(&state.config.auth.session),
    }
}
