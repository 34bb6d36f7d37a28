//! HTTP surface: router assembly, shared state, and serving.

pub mod cors;
pub mod error;
pub mod routes;

use std::any::Any;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use price_checker::ProviderSet;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderSet>,
}

/// Assemble the router with CORS, request tracing, and panic containment.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/prices", post(routes::compare_prices))
        .route("/api/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(cors::cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// An unexpected internal failure: full detail to the logs, a generic body
/// on the wire.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(detail = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "message": "Something went wrong",
        })),
    )
        .into_response()
}

/// Bind and serve until ctrl-c.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Price Checker API listening on {addr}");
    tracing::info!("Health check: http://{addr}/api/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
