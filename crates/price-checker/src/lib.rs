//! Price Checker core — platform providers, price normalization, and offer aggregation.

pub mod aggregator;
pub mod catalog;
pub mod live;
pub mod normalize;
pub mod provider;
pub mod stub;
pub mod types;

pub use aggregator::ProviderSet;
pub use catalog::CategoryFilter;
pub use live::{AmazonCredentials, BigbasketCredentials, FlipkartCredentials, LiveProvider};
pub use normalize::{format_inr, parse_price};
pub use provider::Provider;
pub use stub::StubProvider;
pub use types::*;
