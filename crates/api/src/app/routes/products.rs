//! JSON API mirroring the catalog pages.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use startshop_products::ProductInput;

use crate::app::dto::ProductListResponse;
use crate::app::errors;
use crate::app::loaders::{self, LoaderOutcome};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let data = loaders::load_listing(services.repository()).await;
    (
        StatusCode::OK,
        Json(ProductListResponse {
            products: data.products,
        }),
    )
        .into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match loaders::load_detail(services.repository(), &id).await {
        LoaderOutcome::Ready(data) => (StatusCode::OK, Json(data.resolve().await)).into_response(),
        LoaderOutcome::NotFound => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match services.repository().create(&body).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
