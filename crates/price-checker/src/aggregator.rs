//! Fan-out across platform providers and reduction to a comparison result.

use std::time::Duration;

use chrono::Utc;

use crate::provider::Provider;
use crate::stub::StubProvider;
use crate::types::{
    BestDeal, ComparisonResult, Platform, PlatformQuotes, PriceQuote, ProductQuery, QuoteError,
};

/// Default ceiling for the whole fan-out. Generous compared to the 10s
/// per-call timeout, so it only fires when a provider misbehaves.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);

/// The three platform providers in fixed order, plus the aggregate deadline.
#[derive(Debug)]
pub struct ProviderSet {
    amazon: Provider,
    flipkart: Provider,
    bigbasket: Provider,
    deadline: Duration,
}

impl ProviderSet {
    pub fn new(amazon: Provider, flipkart: Provider, bigbasket: Provider) -> Self {
        debug_assert_eq!(amazon.platform(), Platform::Amazon);
        debug_assert_eq!(flipkart.platform(), Platform::Flipkart);
        debug_assert_eq!(bigbasket.platform(), Platform::Bigbasket);

        Self { amazon, flipkart, bigbasket, deadline: DEFAULT_DEADLINE }
    }

    /// All-stub set, used for local development and tests.
    pub fn stub() -> Self {
        Self::new(
            Provider::Stub(StubProvider::new(Platform::Amazon)),
            Provider::Stub(StubProvider::new(Platform::Flipkart)),
            Provider::Stub(StubProvider::new(Platform::Bigbasket)),
        )
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Compare prices for one query across all platforms.
    ///
    /// All providers are dispatched concurrently and joined on completion —
    /// parallel dispatch, join-all, no early cancellation. A provider that
    /// overruns the deadline degrades to a `timeout` quote while the others'
    /// results stand. Always returns a result: zero available offers is a
    /// success with `best_deal: None`.
    pub async fn compare(&self, query: &ProductQuery) -> ComparisonResult {
        let name = query.product_name.as_str();

        let (amazon, flipkart, bigbasket) = tokio::join!(
            quote_within(&self.amazon, name, self.deadline),
            quote_within(&self.flipkart, name, self.deadline),
            quote_within(&self.bigbasket, name, self.deadline),
        );

        let prices = PlatformQuotes { amazon, flipkart, bigbasket };
        let best_deal = best_deal(&prices);

        ComparisonResult {
            product_name: query.product_name.clone(),
            current_platform: query
                .current_platform
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            current_price: query
                .current_price
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            timestamp: Utc::now(),
            prices,
            best_deal,
        }
    }
}

/// Bound one provider call by the aggregate deadline.
async fn quote_within(provider: &Provider, product_name: &str, deadline: Duration) -> PriceQuote {
    match tokio::time::timeout(deadline, provider.quote(product_name)).await {
        Ok(quote) => quote,
        Err(_) => PriceQuote::failed(
            provider.platform(),
            QuoteError::timeout(format!("no answer within {}ms", deadline.as_millis())),
        ),
    }
}

/// The cheapest available, parseable offer. Strict `<` keeps the earliest
/// platform on ties.
fn best_deal(prices: &PlatformQuotes) -> Option<BestDeal> {
    let mut best: Option<(&PriceQuote, f64)> = None;

    for quote in prices.iter() {
        let Some(value) = quote.rankable_price() else { continue };
        if best.map_or(true, |(_, min)| value < min) {
            best = Some((quote, value));
        }
    }

    best.map(|(quote, value)| BestDeal {
        platform: quote.platform,
        price: value,
        display_price: quote.price.clone().unwrap_or_default(),
    })
}
