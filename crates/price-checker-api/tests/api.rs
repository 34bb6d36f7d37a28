//! End-to-end tests for the price API, driving the router in-process.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use price_checker::live::{http_client, BigbasketCredentials, LiveProvider};
use price_checker::{Platform, Provider, ProviderSet, StubProvider};
use price_checker_api::{router, AppState};

// ─────────────────────── helpers ───────────────────────

fn app_with(providers: ProviderSet) -> Router {
    router(AppState { providers: Arc::new(providers) })
}

fn stub_app() -> Router {
    app_with(ProviderSet::stub())
}

/// A provider set whose BigBasket provider dials a port that refuses
/// connections — a deterministic "network is down" for one platform.
fn one_broken_provider() -> ProviderSet {
    let client = http_client(Duration::from_secs(2)).unwrap();
    let broken = Provider::Live(LiveProvider::bigbasket(
        client,
        BigbasketCredentials {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        },
    ));

    ProviderSet::new(
        Provider::Stub(StubProvider::new(Platform::Amazon)),
        Provider::Stub(StubProvider::new(Platform::Flipkart)),
        broken,
    )
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_prices(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/prices")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    read_json(app.oneshot(request).await.unwrap()).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read_json(app.oneshot(request).await.unwrap()).await
}

// ─────────────────────── comparison ───────────────────────

#[tokio::test]
async fn test_compare_reports_every_platform() {
    let (status, body) =
        post_prices(stub_app(), &json!({ "productName": "wireless mouse" }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productName"], "wireless mouse");
    assert_eq!(body["currentPlatform"], "unknown");
    assert_eq!(body["currentPrice"], "Unknown");
    assert!(body["timestamp"].is_string());

    // All three platforms are reported, in fixed order.
    let prices = body["prices"].as_object().unwrap();
    let keys: Vec<&String> = prices.keys().collect();
    assert_eq!(keys, ["amazon", "flipkart", "bigbasket"]);

    // Marketplaces quote electronics; the grocery platform declines cleanly.
    for platform in ["amazon", "flipkart"] {
        let quote = &prices[platform];
        assert_eq!(quote["available"], true);
        assert!(quote["numericPrice"].as_f64().unwrap() > 0.0);
        assert!(quote["price"].as_str().unwrap().starts_with('₹'));
    }
    assert_eq!(prices["bigbasket"]["available"], false);
    assert!(prices["bigbasket"].get("error").is_none());
}

#[tokio::test]
async fn test_best_deal_is_the_cheapest_available_quote() {
    let (status, body) =
        post_prices(stub_app(), &json!({ "productName": "wireless mouse" }).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let min = body["prices"]
        .as_object()
        .unwrap()
        .values()
        .filter(|q| q["available"] == true)
        .filter_map(|q| q["numericPrice"].as_f64())
        .fold(f64::INFINITY, f64::min);

    let deal = &body["bestDeal"];
    assert!(!deal.is_null());
    assert_eq!(deal["price"].as_f64().unwrap(), min);

    let winner = deal["platform"].as_str().unwrap();
    assert_eq!(
        body["prices"][winner]["numericPrice"].as_f64().unwrap(),
        min
    );
    assert_eq!(
        deal["displayPrice"].as_str().unwrap(),
        body["prices"][winner]["price"].as_str().unwrap()
    );
}

#[tokio::test]
async fn test_grocery_query_reaches_all_platforms() {
    let (status, body) = post_prices(
        stub_app(),
        &json!({ "productName": "basmati rice", "currentPrice": "₹299", "platform": "amazon" })
            .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPlatform"], "amazon");
    assert_eq!(body["currentPrice"], "₹299");
    for platform in ["amazon", "flipkart", "bigbasket"] {
        assert_eq!(body["prices"][platform]["available"], true);
    }
    assert!(!body["bestDeal"].is_null());
}

#[tokio::test]
async fn test_unrecognized_platform_reports_unknown() {
    let (status, body) = post_prices(
        stub_app(),
        &json!({ "productName": "rice", "platform": "ebay" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPlatform"], "unknown");
}

// ─────────────────────── validation ───────────────────────

#[tokio::test]
async fn test_missing_product_name_is_rejected() {
    let (status, body) = post_prices(stub_app(), &json!({}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product name is required");
}

#[tokio::test]
async fn test_blank_product_name_is_rejected() {
    for name in ["", "   "] {
        let (status, body) =
            post_prices(stub_app(), &json!({ "productName": name }).to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Product name is required");
    }
}

#[tokio::test]
async fn test_non_string_product_name_is_rejected() {
    let (status, body) = post_prices(stub_app(), &json!({ "productName": 123 }).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) = post_prices(stub_app(), r#"{"productName":"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

// ─────────────────────── degraded providers ───────────────────────

#[tokio::test]
async fn test_one_failing_provider_does_not_poison_the_rest() {
    let (status, body) = post_prices(
        app_with(one_broken_provider()),
        &json!({ "productName": "rice" }).to_string(),
    )
    .await;

    // Still a success: the failure is data inside the body.
    assert_eq!(status, StatusCode::OK);

    let bigbasket = &body["prices"]["bigbasket"];
    assert_eq!(bigbasket["available"], false);
    assert_eq!(bigbasket["error"]["code"], "upstream");
    assert!(!bigbasket["error"]["message"].as_str().unwrap().is_empty());

    assert_eq!(body["prices"]["amazon"]["available"], true);
    assert_eq!(body["prices"]["flipkart"]["available"], true);

    let deal = &body["bestDeal"];
    assert!(!deal.is_null());
    assert_ne!(deal["platform"], "bigbasket");
}

// ─────────────────────── health and routing ───────────────────────

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(stub_app(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Price Checker API is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_404_body() {
    let (status, body) = get(stub_app(), "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

// ─────────────────────── cross-origin policy ───────────────────────

#[tokio::test]
async fn test_allowed_origin_is_echoed() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/prices")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "chrome-extension://abcdefghijklmnop")
        .body(Body::from(json!({ "productName": "rice" }).to_string()))
        .unwrap();

    let response = stub_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "chrome-extension://abcdefghijklmnop"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_disallowed_origin_gets_no_cors_headers() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/prices")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::from(json!({ "productName": "rice" }).to_string()))
        .unwrap();

    let response = stub_app().oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
