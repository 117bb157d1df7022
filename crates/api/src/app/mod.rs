//! HTTP application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: shared request-scoped dependencies (repository, view registry)
//! - `loaders.rs`: per-page data fetching that runs before a page renders
//! - `views.rs`: HTML rendering of loader output
//! - `routes/`: HTTP routes + handlers (pages, JSON API, system)
//! - `dto.rs`: request/response DTOs and form mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use startshop_infra::ProductRepository;

pub mod dto;
pub mod errors;
pub mod loaders;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(repository: ProductRepository) -> anyhow::Result<Router> {
    let services = Arc::new(services::AppServices::new(repository)?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}
