//! OpenAPI documentation for the HTTP API.
//!
//! The document is served at `/api-docs/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;

/// Security scheme for booking routes (session cookie issued by `POST /jwt`).
struct CookieSecurityAddon;

impl Modify for CookieSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "CookieAuth".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "Session cookie, named `token` unless `auth.session.cookie_name` says otherwise. \
                     Obtain one with `POST /jwt`; browsers send it automatically.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Car Doctor API", description = "Service catalog and customer bookings for the Car Doctor workshop."),
    modifiers(&CookieSecurityAddon),
    paths(
        api::handlers::auth::issue_token,
        api::handlers::auth::logout,
        api::handlers::services::list_services,
        api::handlers::services::get_service,
        api::handlers::bookings::create_booking,
        api::handlers::bookings::list_bookings,
        api::handlers::bookings::update_booking,
        api::handlers::bookings::delete_booking,
    ),
    components(
        schemas(
            api::models::auth::TokenRequest,
            api::models::auth::SuccessResponse,
            api::models::services::ServiceResponse,
            api::models::services::ServiceSummaryResponse,
            api::models::services::FacilityResponse,
            api::models::bookings::BookingCreate,
            api::models::bookings::BookingResponse,
            api::models::bookings::BookingStatusUpdate,
            api::models::bookings::InsertResult,
            api::models::bookings::UpdateResult,
            api::models::bookings::DeleteResult,
        )
    ),
    tags(
        (name = "authentication", description = "Session cookie management"),
        (name = "services", description = "Public service catalog"),
        (name = "bookings", description = "Customer bookings, scoped to the session's email"),
    )
)]
pub struct ApiDoc;
