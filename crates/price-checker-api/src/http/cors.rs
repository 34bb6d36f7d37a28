//! Cross-origin policy: the extension, local development, and hosting domains.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Hosting-platform domain suffixes that may call the API.
const HOSTED_SUFFIXES: &[&str] = &["replit.dev", "replit.co", "replit.app"];

/// Build the CORS layer.
///
/// Requests without an `Origin` header (curl, mobile apps) bypass CORS by
/// its nature; the predicate only judges browsers that send one. Allowed
/// origins are echoed back with credentials enabled.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().map(origin_allowed).unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Allow-list: the extension's own scheme, localhost over http(s), and the
/// hosting platform's domains (suffix match on the host, not substring).
fn origin_allowed(origin: &str) -> bool {
    if origin.starts_with("chrome-extension://") {
        return true;
    }

    let Some((scheme, rest)) = origin.split_once("://") else {
        return false;
    };
    if scheme != "http" && scheme != "https" {
        return false;
    }
    let host = rest.split(['/', ':']).next().unwrap_or("");

    if host == "localhost" {
        return true;
    }

    HOSTED_SUFFIXES
        .iter()
        .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")))
}
