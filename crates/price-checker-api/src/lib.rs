//! Price Checker API — HTTP backend for the Price Checker browser extension.

pub mod config;
pub mod http;

pub use http::{router, AppState};
