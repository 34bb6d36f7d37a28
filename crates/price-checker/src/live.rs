//! Live providers — query retail platforms' search APIs over HTTP.
//!
//! One bounded search call per quote, explicit credentials, no hidden
//! globals. Every failure is folded into the returned quote; transient
//! transport failures are retried once before giving up.

use std::time::Duration;

use serde::Deserialize;

use crate::catalog::CategoryFilter;
use crate::normalize::format_inr;
use crate::types::{Platform, PriceQuote, QuoteError};

/// User agent sent on every outbound search call.
pub const USER_AGENT: &str = "Price-Checker-Extension/1.0";

/// Default per-call timeout for outbound searches.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by all live providers.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// RapidAPI credentials for the Amazon product search.
#[derive(Debug, Clone)]
pub struct AmazonCredentials {
    pub api_key: String,
    pub api_host: String,
}

/// Flipkart affiliate API credentials.
#[derive(Debug, Clone)]
pub struct FlipkartCredentials {
    pub affiliate_id: String,
    pub api_token: String,
}

/// BigBasket product-search credentials and endpoint.
#[derive(Debug, Clone)]
pub struct BigbasketCredentials {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug)]
enum Endpoint {
    Amazon(AmazonCredentials),
    Flipkart(FlipkartCredentials),
    Bigbasket(BigbasketCredentials),
}

/// Internal failure of one search call. Never escapes `quote`.
#[derive(thiserror::Error, Debug)]
enum SearchError {
    #[error("search request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl SearchError {
    fn is_transient(&self) -> bool {
        matches!(self, SearchError::Timeout | SearchError::Transport(_))
    }

    fn into_quote_error(self) -> QuoteError {
        match self {
            SearchError::Timeout => QuoteError::timeout("search request timed out"),
            other => QuoteError::upstream(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Transport(e)
        }
    }
}

/// One search result, reduced to the fields a quote needs.
#[derive(Debug)]
struct SearchHit {
    price: String,
    url: Option<String>,
    title: Option<String>,
}

/// A provider backed by the platform's real search API.
#[derive(Debug)]
pub struct LiveProvider {
    platform: Platform,
    client: reqwest::Client,
    endpoint: Endpoint,
    assortment: Option<CategoryFilter>,
}

impl LiveProvider {
    pub fn amazon(client: reqwest::Client, credentials: AmazonCredentials) -> Self {
        Self {
            platform: Platform::Amazon,
            client,
            endpoint: Endpoint::Amazon(credentials),
            assortment: None,
        }
    }

    pub fn flipkart(client: reqwest::Client, credentials: FlipkartCredentials) -> Self {
        Self {
            platform: Platform::Flipkart,
            client,
            endpoint: Endpoint::Flipkart(credentials),
            assortment: None,
        }
    }

    /// BigBasket starts with the grocery assortment filter, matching its
    /// catalog: out-of-category queries are "not carried", no search happens.
    pub fn bigbasket(client: reqwest::Client, credentials: BigbasketCredentials) -> Self {
        Self {
            platform: Platform::Bigbasket,
            client,
            endpoint: Endpoint::Bigbasket(credentials),
            assortment: Some(CategoryFilter::groceries()),
        }
    }

    /// Replace the assortment predicate. `None` carries everything.
    pub fn with_assortment(mut self, assortment: Option<CategoryFilter>) -> Self {
        self.assortment = assortment;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub async fn quote(&self, product_name: &str) -> PriceQuote {
        if let Some(filter) = &self.assortment {
            if !filter.carries(product_name) {
                return PriceQuote::not_carried(self.platform);
            }
        }

        // Searches are GETs, safe to retry once on a transient failure.
        let result = match self.search(product_name).await {
            Err(e) if e.is_transient() => {
                tracing::warn!(platform = %self.platform, error = %e, "search failed, retrying once");
                self.search(product_name).await
            }
            other => other,
        };

        match result {
            Ok(Some(hit)) => PriceQuote::offer(
                self.platform,
                hit.price,
                hit.url
                    .or_else(|| Some(self.platform.search_url(product_name))),
                hit.title,
            ),
            Ok(None) => PriceQuote::not_carried(self.platform),
            Err(e) => {
                tracing::warn!(platform = %self.platform, error = %e, "search failed");
                PriceQuote::failed(self.platform, e.into_quote_error())
            }
        }
    }

    async fn search(&self, product_name: &str) -> Result<Option<SearchHit>, SearchError> {
        match &self.endpoint {
            Endpoint::Amazon(credentials) => self.search_amazon(credentials, product_name).await,
            Endpoint::Flipkart(credentials) => self.search_flipkart(credentials, product_name).await,
            Endpoint::Bigbasket(credentials) => {
                self.search_bigbasket(credentials, product_name).await
            }
        }
    }

    async fn search_amazon(
        &self,
        credentials: &AmazonCredentials,
        product_name: &str,
    ) -> Result<Option<SearchHit>, SearchError> {
        let url = format!("https://{}/search", credentials.api_host);
        let response = self
            .client
            .get(&url)
            .query(&[("query", product_name), ("country", "IN")])
            .header("X-RapidAPI-Key", &credentials.api_key)
            .header("X-RapidAPI-Host", &credentials.api_host)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let body: AmazonSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body.results.into_iter().find_map(|product| {
            let price = product.price?;
            Some(SearchHit { price, url: product.url, title: product.title })
        }))
    }

    async fn search_flipkart(
        &self,
        credentials: &FlipkartCredentials,
        product_name: &str,
    ) -> Result<Option<SearchHit>, SearchError> {
        let response = self
            .client
            .get("https://affiliate-api.flipkart.net/affiliate/1.0/search.json")
            .query(&[("query", product_name), ("resultCount", "1")])
            .header("Fk-Affiliate-Id", &credentials.affiliate_id)
            .header("Fk-Affiliate-Token", &credentials.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let body: FlipkartSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body.products.into_iter().find_map(|product| {
            let amount = product.base_info.selling_price?.amount;
            Some(SearchHit {
                price: format_inr(amount.round().max(0.0) as u64),
                url: product.base_info.product_url,
                title: product.base_info.title,
            })
        }))
    }

    async fn search_bigbasket(
        &self,
        credentials: &BigbasketCredentials,
        product_name: &str,
    ) -> Result<Option<SearchHit>, SearchError> {
        let url = format!("{}/product/search", credentials.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("q", product_name)])
            .header("X-Api-Key", &credentials.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let body: BigbasketSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body.products.into_iter().find_map(|product| {
            let selling_price = product.sp?;
            Some(SearchHit {
                price: format!("₹{selling_price}"),
                url: product.absolute_url,
                title: product.description,
            })
        }))
    }
}

#[derive(Debug, Deserialize)]
struct AmazonSearchResponse {
    #[serde(default)]
    results: Vec<AmazonProduct>,
}

#[derive(Debug, Deserialize)]
struct AmazonProduct {
    price: Option<String>,
    url: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlipkartSearchResponse {
    #[serde(default)]
    products: Vec<FlipkartProduct>,
}

#[derive(Debug, Deserialize)]
struct FlipkartProduct {
    #[serde(rename = "productBaseInfoV1")]
    base_info: FlipkartBaseInfo,
}

#[derive(Debug, Deserialize)]
struct FlipkartBaseInfo {
    #[serde(rename = "flipkartSellingPrice")]
    selling_price: Option<FlipkartAmount>,
    #[serde(rename = "productUrl")]
    product_url: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlipkartAmount {
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct BigbasketSearchResponse {
    #[serde(default)]
    products: Vec<BigbasketProduct>,
}

#[derive(Debug, Deserialize)]
struct BigbasketProduct {
    /// Selling price in rupees, e.g. `"42.00"`.
    sp: Option<String>,
    absolute_url: Option<String>,
    #[serde(rename = "p_desc")]
    description: Option<String>,
}
