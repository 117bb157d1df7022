use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use serde_json::json;

use startshop_infra::RepositoryError;

use crate::app::dto::ValidationErrorResponse;
use crate::app::views::{ViewError, Views};

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(ValidationErrorResponse {
                error: "validation_error",
                message: errors.to_string(),
                fields: errors.errors(),
            }),
        )
            .into_response(),
        RepositoryError::CreationFailure => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "creation_failure",
            RepositoryError::CreationFailure.to_string(),
        ),
        RepositoryError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

/// Malformed or wrongly typed request bodies.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!(error = %rejection, "rejected request body");
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Render a standalone HTML message page with `status`.
pub fn html_message(
    views: &Views,
    status: StatusCode,
    title: &str,
    message: &str,
) -> axum::response::Response {
    match views.message(title, message) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => render_failure(e),
    }
}

/// Last-resort response when a template fails to render.
pub fn render_failure(err: ViewError) -> axum::response::Response {
    tracing::error!(error = %err, "page render failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1>Something went wrong</h1>".to_string()),
    )
        .into_response()
}
