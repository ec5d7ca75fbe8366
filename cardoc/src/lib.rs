//! # cardoc: Car Doctor workshop backend
//!
//! HTTP backend for an auto-repair shop. It serves a public catalog of the services the workshop
//! offers and a ledger of customer bookings. Customers identify themselves once with their email,
//! receive a signed session cookie, and from then on can only see and change their own bookings.
//!
//! ## Request flow
//!
//! Catalog requests (`/services`, `/service/{id}`) go straight to their handler. Booking requests
//! (`/bookings/*`) first pass the Token Verifier ([`auth::middleware::require_session`]), which
//! rejects a missing or invalid session cookie with 401 before routing reaches any handler. The
//! handler then extracts an [`auth::guard::OwnerScope`], which can only be built from a verified
//! [`api::models::auth::Principal`] and rejects any attempt to name another customer's email with
//! 403. Only then does the single store operation run.
//!
//! ### Core Components
//!
//! - [`api`]: axum handlers and request/response models
//! - [`auth`]: token issuing and verification, the principal extractor, the ownership guard
//! - [`db`]: the [`db::DocumentStore`] trait with PostgreSQL and in-memory implementations
//! - [`config`]: YAML + environment configuration
//! - [`telemetry`]: tracing subscriber and optional OTLP export
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use cardoc::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = cardoc::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     cardoc::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    http::{self, HeaderValue},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
use config::CorsOrigin;
use db::DocumentStore;
use openapi::ApiDoc;

/// Shared state handed to every handler.
///
/// ```ignore
/// let state = AppState::builder()
///     .store(Arc::new(MemoryStore::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = &config.auth.cors.allowed_origins;
    // tower-http rejects `*` inside an origin list
    let allow_origin = if origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut values = Vec::with_capacity(origins.len());
        for origin in origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a trailing slash, unlike Url's serialization
                values.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(values)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PATCH, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.auth.cors.allow_credentials);

    if let Some(max_age) = config.auth.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

async fn banner() -> &'static str {
    concat!("Car Doctor Server ", env!("CARGO_PKG_VERSION"))
}

async fn healthz() -> &'static str {
    "OK"
}

/// Build the application router.
///
/// - public: banner, health check, session endpoints, service catalog, API docs
/// - `/bookings/*`: behind [`auth::middleware::require_session`]
/// - optional Prometheus metrics at `/internal/metrics`
/// - CORS and request tracing around everything
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let booking_routes = Router::new()
        .route(
            "/bookings",
            post(api::handlers::bookings::create_booking).get(api::handlers::bookings::list_bookings),
        )
        .route(
            "/bookings/{id}",
            patch(api::handlers::bookings::update_booking).delete(api::handlers::bookings::delete_booking),
        )
        .route_layer(from_fn_with_state(state.clone(), auth::middleware::require_session));

    let router = Router::new()
        .route("/", get(banner))
        .route("/healthz", get(healthz))
        .route("/jwt", post(api::handlers::auth::issue_token))
        .route("/logout", post(api::handlers::auth::logout))
        .route("/services", get(api::handlers::services::list_services))
        .route("/service/{id}", get(api::handlers::services::get_service))
        .merge(booking_routes)
        .with_state(state.clone())
        .route("/api-docs/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(move || async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// A configured server: store connected, router built, not yet listening.
pub struct Application {
    router: Router,
    app_state: AppState,
}

impl Application {
    /// Connect the store and build the router
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!(
            "Starting cardoc on {} with {} store",
            config.bind_address(),
            if config.database.is_memory() { "memory" } else { "postgres" }
        );

        let store = db::create_store(&config).await?;
        if config.database.is_memory() {
            info!("Using in-memory store; data will not survive a restart");
        }

        let app_state = AppState::builder().store(store).config(config).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, app_state })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.app_state.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Car Doctor server listening on http://{}, available at http://localhost:{}",
            bind_addr, self.app_state.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        self.app_state.store.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
