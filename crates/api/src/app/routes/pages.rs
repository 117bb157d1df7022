//! Server-rendered catalog pages.
//!
//! Each handler runs its page loader, then hands the loader output to the view.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};

use startshop_infra::RepositoryError;
use startshop_products::ProductInput;

use crate::app::dto::ProductForm;
use crate::app::errors;
use crate::app::loaders::{self, LoaderOutcome};
use crate::app::services::AppServices;
use crate::app::views::CreateFormView;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/create-product", get(create_product_form).post(submit_product))
        .route("/:id", get(product_detail))
}

pub async fn home(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.views().home() {
        Ok(body) => Html(body).into_response(),
        Err(e) => errors::render_failure(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let data = loaders::load_listing(services.repository()).await;
    match services.views().listing(&data.products) {
        Ok(body) => Html(body).into_response(),
        Err(e) => errors::render_failure(e),
    }
}

pub async fn product_detail(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let data = match loaders::load_detail(services.repository(), &id).await {
        LoaderOutcome::Ready(data) => data,
        LoaderOutcome::NotFound => {
            return errors::html_message(
                services.views(),
                StatusCode::NOT_FOUND,
                "Product not found",
                "The product you are looking for does not exist.",
            );
        }
    };

    let product = data.product;
    let recommended = data.recommended_products.resolve().await;
    match services.views().detail(&product, &recommended) {
        Ok(body) => Html(body).into_response(),
        Err(e) => errors::render_failure(e),
    }
}

pub async fn create_product_form(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let data = loaders::load_create_form();
    render_form(&services, StatusCode::OK, &data.values, CreateFormView::default())
}

pub async fn submit_product(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<ProductForm>,
) -> axum::response::Response {
    let input = ProductInput::from(form);

    match services.repository().create(&input).await {
        Ok(product) => Redirect::to(&format!("/products/{}", product.id)).into_response(),
        Err(RepositoryError::Validation(validation)) => render_form(
            &services,
            StatusCode::UNPROCESSABLE_ENTITY,
            &input,
            CreateFormView {
                errors: Some(&validation),
                ..CreateFormView::default()
            },
        ),
        Err(e) => render_form(
            &services,
            StatusCode::INTERNAL_SERVER_ERROR,
            &input,
            CreateFormView {
                form_error: Some(e.to_string()),
                ..CreateFormView::default()
            },
        ),
    }
}

fn render_form(
    services: &AppServices,
    status: StatusCode,
    values: &ProductInput,
    view: CreateFormView<'_>,
) -> axum::response::Response {
    let view = CreateFormView {
        values: Some(values),
        ..view
    };
    match services.views().create_form(view) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => errors::render_failure(e),
    }
}
