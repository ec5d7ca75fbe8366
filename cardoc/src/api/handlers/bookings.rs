use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    api::models::{
        auth::Principal,
        bookings::{BookingCreate, BookingResponse, BookingStatusUpdate, DeleteResult, InsertResult, ListBookingsQuery, UpdateResult},
    },
    auth::guard::OwnerScope,
    errors::Error,
    types::{BookingId, Operation},
};

fn parse_booking_id(id: &str) -> Result<BookingId, Error> {
    Uuid::parse_str(id).map_err(|_| Error::BadRequest {
        message: format!("Invalid booking id '{id}'"),
    })
}

/// Create a booking for the authenticated customer
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingCreate,
    tag = "bookings",
    responses(
        (status = 201, description = "Booking created", body = InsertResult),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Booking email does not match the session"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_booking(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<BookingCreate>,
) -> Result<(StatusCode, Json<InsertResult>), Error> {
    let request = request.into_db_request()?;
    OwnerScope::new(principal, None)?.authorize(&request.email, Operation::Create)?;

    let booking = state.store.insert_booking(&request).await?;
    tracing::info!("Created booking {} for {}", booking.id, booking.email);

    Ok((
        StatusCode::CREATED,
        Json(InsertResult {
            acknowledged: true,
            inserted_id: booking.id,
        }),
    ))
}

/// List the authenticated customer's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "Bookings owned by the caller", body = [BookingResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requested email does not match the session"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_bookings(State(state): State<AppState>, scope: OwnerScope) -> Result<Json<Vec<BookingResponse>>, Error> {
    let filter = scope.filter(state.config.bookings.allow_unscoped_listing);
    let bookings = state.store.list_bookings(&filter).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Update the status of one of the caller's bookings
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    request_body = BookingStatusUpdate,
    tag = "bookings",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateResult),
        (status = 400, description = "Malformed id or empty status"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Booking belongs to someone else"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(booking_id = %id))]
pub async fn update_booking(
    State(state): State<AppState>,
    scope: OwnerScope,
    Path(id): Path<String>,
    Json(update): Json<BookingStatusUpdate>,
) -> Result<Json<UpdateResult>, Error> {
    let booking_id = parse_booking_id(&id)?;
    let status = update.status.trim();
    if status.is_empty() {
        return Err(Error::BadRequest {
            message: "Field 'status' is required".to_string(),
        });
    }

    let Some(existing) = state.store.get_booking(booking_id).await? else {
        return Ok(Json(UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        }));
    };
    scope.ensure_owns(&existing, Operation::Update)?;

    let updated = state
        .store
        .update_booking_status(booking_id, &scope.principal().email, status)
        .await?;

    let (matched_count, modified_count) = match updated {
        Some(_) if existing.status.as_deref() == Some(status) => (1, 0),
        Some(_) => (1, 1),
        None => (0, 0),
    };
    Ok(Json(UpdateResult {
        acknowledged: true,
        matched_count,
        modified_count,
    }))
}

/// Cancel one of the caller's bookings
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Delete acknowledged", body = DeleteResult),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Booking belongs to someone else"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(booking_id = %id))]
pub async fn delete_booking(State(state): State<AppState>, scope: OwnerScope, Path(id): Path<String>) -> Result<Json<DeleteResult>, Error> {
    let booking_id = parse_booking_id(&id)?;

    let deleted = match state.store.get_booking(booking_id).await? {
        Some(existing) => {
            scope.ensure_owns(&existing, Operation::Delete)?;
            state.store.delete_booking(booking_id, &scope.principal().email).await?
        }
        None => false,
    };

    Ok(Json(DeleteResult {
        acknowledged: true,
        deleted_count: u64::from(deleted),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DocumentStore, memory::MemoryStore, models::bookings::BookingCreateDBRequest};
    use crate::test_utils::{create_test_server, create_test_state, session_cookie_for};
    use axum::http::header::COOKIE;

    fn booking_for(email: &str, service: &str) -> BookingCreateDBRequest {
        BookingCreateDBRequest {
            customer_name: "Customer".to_string(),
            email: email.to_string(),
            date: "2024-06-01".to_string(),
            service: service.to_string(),
            service_id: "02".to_string(),
            price: "150.00".to_string(),
            img: None,
        }
    }

    async fn seed(store: &MemoryStore) {
        store.insert_booking(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        store.insert_booking(&booking_for("a@x.com", "Oil Change")).await.unwrap();
        store.insert_booking(&booking_for("b@y.com", "Wheel Alignment")).await.unwrap();
    }

    #[test_log::test(tokio::test)]
    async fn test_list_bookings_for_owner_and_forbidden_for_others() {
        let (state, store) = create_test_state();
        seed(&store).await;
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let response = server
            .get("/bookings")
            .add_query_param("email", "a@x.com")
            .add_header(COOKIE, cookie.clone())
            .await;
        response.assert_status_ok();
        let bookings: Vec<BookingResponse> = response.json();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.email == "a@x.com"));

        let response = server
            .get("/bookings")
            .add_query_param("email", "b@y.com")
            .add_header(COOKIE, cookie)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_without_target_is_scoped_and_idempotent() {
        let (state, store) = create_test_state();
        seed(&store).await;
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let first: Vec<BookingResponse> = server.get("/bookings").add_header(COOKIE, cookie.clone()).await.json();
        let second: Vec<BookingResponse> = server.get("/bookings").add_header(COOKIE, cookie).await.json();

        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|b| b.email == "a@x.com"));
        let ids = |list: &[BookingResponse]| list.iter().map(|b| b.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test_log::test(tokio::test)]
    async fn test_unscoped_listing_when_enabled() {
        let (mut state, store) = create_test_state();
        seed(&store).await;
        state.config.bookings.allow_unscoped_listing = true;
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let bookings: Vec<BookingResponse> = server.get("/bookings").add_header(COOKIE, cookie).await.json();
        assert_eq!(bookings.len(), 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_booking() {
        let (state, store) = create_test_state();
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let body = serde_json::json!({
            "customerName": "Ada",
            "email": "a@x.com",
            "date": "2024-06-01",
            "service": "Engine Repair",
            "service_id": "02",
            "price": "150.00"
        });
        let response = server.post("/bookings").json(&body).add_header(COOKIE, cookie.clone()).await;
        response.assert_status(StatusCode::CREATED);
        let result: InsertResult = response.json();
        assert!(result.acknowledged);

        let stored = store.get_booking(result.inserted_id).await.unwrap().unwrap();
        assert_eq!(stored.customer_name, "Ada");

        // Booking on behalf of someone else
        let mut other = body.clone();
        other["email"] = "b@y.com".into();
        let response = server.post("/bookings").json(&other).add_header(COOKIE, cookie).await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(store.booking_count(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_booking_with_absent_field_is_bad_request() {
        let (state, store) = create_test_state();
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let body = serde_json::json!({
            "customerName": "Ada",
            "email": "a@x.com",
            "service": "Engine Repair",
            "service_id": "02"
        });
        let response = server.post("/bookings").json(&body).add_header(COOKIE, cookie.clone()).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Field 'date' is required");
        assert_eq!(store.booking_count(), 0);

        let mine = store.insert_booking(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        server
            .patch(&format!("/bookings/{}", mine.id))
            .json(&serde_json::json!({}))
            .add_header(COOKIE, cookie)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(tokio::test)]
    async fn test_rejected_requests_have_no_side_effects() {
        let (state, store) = create_test_state();
        seed(&store).await;
        let victim = store.list_bookings(&Default::default()).await.unwrap()[0].id;
        let server = create_test_server(state);

        let body = serde_json::json!({
            "email": "a@x.com", "date": "2024-06-01", "service": "Engine Repair", "service_id": "02"
        });
        server.post("/bookings").json(&body).await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .delete(&format!("/bookings/{victim}"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .patch(&format!("/bookings/{victim}"))
            .json(&serde_json::json!({"status": "confirm"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        assert_eq!(store.booking_count(), 3);
        assert!(store.get_booking(victim).await.unwrap().unwrap().status.is_none());
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_booking_requires_owner() {
        let (state, store) = create_test_state();
        let mine = store.insert_booking(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        let theirs = store.insert_booking(&booking_for("b@y.com", "Oil Change")).await.unwrap();
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let response = server
            .delete(&format!("/bookings/{}", theirs.id))
            .add_header(COOKIE, cookie.clone())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert!(!response.text().contains("b@y.com"));
        assert!(store.get_booking(theirs.id).await.unwrap().is_some());

        let result: DeleteResult = server
            .delete(&format!("/bookings/{}", mine.id))
            .add_header(COOKIE, cookie.clone())
            .await
            .json();
        assert_eq!(result.deleted_count, 1);

        let result: DeleteResult = server
            .delete(&format!("/bookings/{}", mine.id))
            .add_header(COOKIE, cookie.clone())
            .await
            .json();
        assert_eq!(result.deleted_count, 0);

        server
            .delete("/bookings/not-an-id")
            .add_header(COOKIE, cookie)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(tokio::test)]
    async fn test_update_booking_status() {
        let (state, store) = create_test_state();
        let mine = store.insert_booking(&booking_for("a@x.com", "Engine Repair")).await.unwrap();
        let theirs = store.insert_booking(&booking_for("b@y.com", "Oil Change")).await.unwrap();
        let cookie = session_cookie_for("a@x.com", &state.config);
        let server = create_test_server(state);

        let result: UpdateResult = server
            .patch(&format!("/bookings/{}", mine.id))
            .json(&serde_json::json!({"status": "confirm"}))
            .add_header(COOKIE, cookie.clone())
            .await
            .json();
        assert_eq!((result.matched_count, result.modified_count), (1, 1));

        let result: UpdateResult = server
            .patch(&format!("/bookings/{}", mine.id))
            .json(&serde_json::json!({"status": "confirm"}))
            .add_header(COOKIE, cookie.clone())
            .await
            .json();
        assert_eq!((result.matched_count, result.modified_count), (1, 0));

        server
            .patch(&format!("/bookings/{}", theirs.id))
            .json(&serde_json::json!({"status": "confirm"}))
            .add_header(COOKIE, cookie)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert!(store.get_booking(theirs.id).await.unwrap().unwrap().status.is_none());
    }
}
