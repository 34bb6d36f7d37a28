//! The per-platform provider seam: stub or live, chosen once at startup.

use crate::live::LiveProvider;
use crate::stub::StubProvider;
use crate::types::{Platform, PriceQuote, QuoteError};

/// A platform's pricing backend.
///
/// The variant is decided once, from configuration, when the provider set is
/// built — never per call. `quote` never fails: every failure is folded into
/// the returned quote, so one bad provider can never poison a comparison.
#[derive(Debug)]
pub enum Provider {
    /// Fabricates plausible quotes without touching the network.
    Stub(StubProvider),
    /// Queries the platform's search API.
    Live(LiveProvider),
}

impl Provider {
    pub fn platform(&self) -> Platform {
        match self {
            Provider::Stub(p) => p.platform(),
            Provider::Live(p) => p.platform(),
        }
    }

    /// Answer a quote for `product_name`.
    ///
    /// Blank input yields an `invalid-query` failure quote rather than a
    /// fabricated price.
    pub async fn quote(&self, product_name: &str) -> PriceQuote {
        if product_name.trim().is_empty() {
            return PriceQuote::failed(
                self.platform(),
                QuoteError::invalid_query("product name must not be empty"),
            );
        }

        match self {
            Provider::Stub(p) => p.quote(product_name),
            Provider::Live(p) => p.quote(product_name).await,
        }
    }
}
