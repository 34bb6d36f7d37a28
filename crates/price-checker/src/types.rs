//! Core data types for product queries, price quotes, and comparison results.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// Supported retail platforms.
///
/// The declaration order (amazon, flipkart, bigbasket) is load-bearing: it is
/// the order quotes are reported in and the tie-break order for equally
/// priced offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    Flipkart,
    Bigbasket,
}

impl Platform {
    /// All platforms, in fixed comparison order.
    pub const ALL: [Platform; 3] = [Platform::Amazon, Platform::Flipkart, Platform::Bigbasket];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
            Platform::Bigbasket => "bigbasket",
        }
    }

    /// Parse a platform identifier, case-insensitively.
    pub fn parse(s: &str) -> Option<Platform> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amazon" => Some(Platform::Amazon),
            "flipkart" => Some(Platform::Flipkart),
            "bigbasket" => Some(Platform::Bigbasket),
            _ => None,
        }
    }

    /// Public search deep link for a product on this platform.
    pub fn search_url(&self, product_name: &str) -> String {
        let query = urlencoding::encode(product_name);
        match self {
            Platform::Amazon => format!("https://amazon.in/s?k={query}"),
            Platform::Flipkart => format!("https://flipkart.com/search?q={query}"),
            Platform::Bigbasket => format!("https://bigbasket.com/ps/?q={query}"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparison request, built at the HTTP boundary after validation.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub product_name: String,
    /// Display price scraped from the page the user is on, if any.
    pub current_price: Option<String>,
    /// Platform the user is currently browsing, if recognized.
    pub current_platform: Option<Platform>,
}

impl ProductQuery {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            current_price: None,
            current_platform: None,
        }
    }
}

/// Why a provider could not produce a usable offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteErrorCode {
    /// The provider did not answer within its deadline.
    Timeout,
    /// The upstream call failed or returned an unusable response.
    Upstream,
    /// The query itself was unusable (empty product name).
    InvalidQuery,
}

/// A contained provider failure, carried as quote data rather than raised.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteError {
    pub code: QuoteErrorCode,
    pub message: String,
}

impl QuoteError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self { code: QuoteErrorCode::Timeout, message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self { code: QuoteErrorCode::Upstream, message: message.into() }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self { code: QuoteErrorCode::InvalidQuery, message: message.into() }
    }
}

/// One platform's answer for one query. Immutable once produced.
///
/// "Not carried" and "failed" are both `available: false`; only the latter
/// carries an error. Failures never propagate past this type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub platform: Platform,
    /// Currency-prefixed display price, e.g. `₹12,345`.
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_price: Option<f64>,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QuoteError>,
}

impl PriceQuote {
    /// An available offer. The numeric price is derived from the display
    /// string; a display price that fails to parse leaves it `None` and the
    /// quote out of best-deal ranking.
    pub fn offer(
        platform: Platform,
        price: String,
        url: Option<String>,
        title: Option<String>,
    ) -> Self {
        let numeric_price = normalize::parse_price(&price);
        Self {
            platform,
            price: Some(price),
            numeric_price,
            url,
            title,
            available: true,
            error: None,
        }
    }

    /// The platform does not carry this product. Not an error.
    pub fn not_carried(platform: Platform) -> Self {
        Self {
            platform,
            price: None,
            numeric_price: None,
            url: None,
            title: None,
            available: false,
            error: None,
        }
    }

    /// A contained provider failure.
    pub fn failed(platform: Platform, error: QuoteError) -> Self {
        Self {
            platform,
            price: None,
            numeric_price: None,
            url: None,
            title: None,
            available: false,
            error: Some(error),
        }
    }

    /// Numeric price usable for ranking: available, displayed, finite, and
    /// strictly positive.
    pub fn rankable_price(&self) -> Option<f64> {
        if !self.available || self.price.is_none() {
            return None;
        }
        self.numeric_price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// Per-platform quotes. Field order doubles as the reporting and tie-break
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformQuotes {
    pub amazon: PriceQuote,
    pub flipkart: PriceQuote,
    pub bigbasket: PriceQuote,
}

impl PlatformQuotes {
    pub fn get(&self, platform: Platform) -> &PriceQuote {
        match platform {
            Platform::Amazon => &self.amazon,
            Platform::Flipkart => &self.flipkart,
            Platform::Bigbasket => &self.bigbasket,
        }
    }

    /// Iterate quotes in fixed platform order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceQuote> {
        [&self.amazon, &self.flipkart, &self.bigbasket].into_iter()
    }
}

/// The cheapest available, numerically parseable offer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestDeal {
    pub platform: Platform,
    pub price: f64,
    pub display_price: String,
}

/// The aggregated answer for one comparison request. Constructed once,
/// returned to the caller, never persisted server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub product_name: String,
    /// Canonical platform name or `"unknown"`.
    pub current_platform: String,
    pub current_price: String,
    pub timestamp: DateTime<Utc>,
    pub prices: PlatformQuotes,
    /// `None` serializes as an explicit `null`: zero available offers is a
    /// successful result, not an error.
    pub best_deal: Option<BestDeal>,
}
