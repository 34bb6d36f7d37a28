//! Route handlers for the price API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use price_checker::{ComparisonResult, Platform, ProductQuery};

use super::error::ApiError;
use super::AppState;

/// Wire form of a comparison request. `product_name` stays optional here so
/// a missing field surfaces as the domain-level 400, not a serde rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    current_price: Option<String>,
    #[serde(default)]
    platform: Option<String>,
}

/// `POST /api/prices` — compare one product across all platforms.
///
/// Validation happens here, before any provider is dispatched. The
/// comparison itself cannot fail; every provider problem arrives as quote
/// data inside the 200 body.
pub async fn compare_prices(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let product_name = request
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingProductName)?
        .to_string();

    tracing::info!(product = %product_name, "price comparison request");

    let query = ProductQuery {
        product_name,
        current_price: request.current_price,
        current_platform: request.platform.as_deref().and_then(Platform::parse),
    };

    Ok(Json(state.providers.compare(&query).await))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Price Checker API is running",
        timestamp: Utc::now(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}
