//! Session payloads and the authenticated principal.

use axum::{
    Json,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The authenticated identity carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub email: String,
}

/// Body of `POST /jwt`. Fields other than `email` are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
}

/// Acknowledgement returned by the session endpoints. The token itself only travels in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response that sets (or clears) the session cookie.
#[derive(Debug)]
pub struct SessionResponse {
    pub body: SuccessResponse,
    pub cookie: String,
}

impl IntoResponse for SessionResponse {
    fn into_response(self) -> Response {
        ([(SET_COOKIE, self.cookie)], Json(self.body)).into_response()
    }
}
