use axum::{routing::get, Router};

pub mod pages;
pub mod products;
pub mod system;

/// Router for every catalog endpoint: HTML pages plus the JSON API under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(pages::home))
        .nest("/products", pages::router())
        .nest("/api/products", products::router())
}
