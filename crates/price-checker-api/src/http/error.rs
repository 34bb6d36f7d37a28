//! Typed API errors and their wire form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Client errors reported by the price API. The wire body carries only the
/// variant's message; anything more specific stays in the logs.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Product name is required")]
    MissingProductName,

    #[error("Invalid request body")]
    InvalidBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InvalidBody(detail) = &self {
            tracing::warn!(detail = %detail, "rejected request body");
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
