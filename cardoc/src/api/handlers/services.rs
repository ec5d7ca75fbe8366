use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    AppState,
    api::models::services::{ServiceResponse, ServiceSummaryResponse},
    errors::Error,
};

/// List the service catalog
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses(
        (status = 200, description = "All catalog entries", body = [ServiceResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<ServiceResponse>>, Error> {
    let services = state.store.list_services().await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

/// Get the checkout summary of a single catalog entry
#[utoipa::path(
    get,
    path = "/service/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Catalog entry summary", body = ServiceSummaryResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Service not found"),
    )
)]
#[tracing::instrument(skip_all, fields(service_id = %id))]
pub async fn get_service(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ServiceSummaryResponse>, Error> {
    let service_id = Uuid::parse_str(&id).map_err(|_| Error::BadRequest {
        message: format!("Invalid service id '{id}'"),
    })?;

    let summary = state.store.get_service(service_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Service".to_string(),
        id: id.clone(),
    })?;

    Ok(Json(summary.into()))
}
