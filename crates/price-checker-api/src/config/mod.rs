//! Server configuration resolved from CLI flags and environment variables.

use std::time::Duration;

use price_checker::aggregator;
use price_checker::live::{
    self, AmazonCredentials, BigbasketCredentials, FlipkartCredentials, LiveProvider,
};
use price_checker::{Platform, Provider, ProviderSet, StubProvider};

const DEFAULT_AMAZON_API_HOST: &str = "amazon-products1.p.rapidapi.com";
const DEFAULT_BIGBASKET_API_URL: &str = "https://api.bigbasket.com";

/// How providers are selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderMode {
    /// Live where credentials are configured, stub elsewhere.
    Auto,
    /// Stubs everywhere; nothing leaves the machine.
    Stub,
    /// Live everywhere; a platform without credentials falls back to stub
    /// with a warning.
    Live,
}

/// Resolve the listen address: flag, then env, then the default.
pub fn resolve_listen_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    if let Ok(addr) = std::env::var("PRICE_CHECKER_ADDR") {
        return addr;
    }

    if let Ok(port) = std::env::var("PORT") {
        return format!("0.0.0.0:{port}");
    }

    "0.0.0.0:5000".to_string()
}

/// Build the provider set for the configured mode. Each platform's choice is
/// made here, once, and logged — request handlers never branch on it.
pub fn build_provider_set(mode: ProviderMode) -> anyhow::Result<ProviderSet> {
    let call_timeout = env_secs("PRICE_CHECKER_PROVIDER_TIMEOUT_SECS", live::DEFAULT_CALL_TIMEOUT);
    let deadline = env_secs("PRICE_CHECKER_DEADLINE_SECS", aggregator::DEFAULT_DEADLINE);

    if mode == ProviderMode::Stub {
        tracing::info!("providers: stub (amazon, flipkart, bigbasket)");
        return Ok(ProviderSet::stub().with_deadline(deadline));
    }

    let client = live::http_client(call_timeout)?;

    let amazon = match std::env::var("AMAZON_API_KEY") {
        Ok(api_key) => {
            let api_host = std::env::var("AMAZON_API_HOST")
                .unwrap_or_else(|_| DEFAULT_AMAZON_API_HOST.to_string());
            live_provider(LiveProvider::amazon(
                client.clone(),
                AmazonCredentials { api_key, api_host },
            ))
        }
        Err(_) => stub_provider(Platform::Amazon, mode),
    };

    let flipkart = match (
        std::env::var("FLIPKART_AFFILIATE_ID"),
        std::env::var("FLIPKART_API_TOKEN"),
    ) {
        (Ok(affiliate_id), Ok(api_token)) => live_provider(LiveProvider::flipkart(
            client.clone(),
            FlipkartCredentials { affiliate_id, api_token },
        )),
        _ => stub_provider(Platform::Flipkart, mode),
    };

    let bigbasket = match std::env::var("BIGBASKET_API_KEY") {
        Ok(api_key) => {
            let base_url = std::env::var("BIGBASKET_API_URL")
                .unwrap_or_else(|_| DEFAULT_BIGBASKET_API_URL.to_string());
            live_provider(LiveProvider::bigbasket(
                client,
                BigbasketCredentials { api_key, base_url },
            ))
        }
        Err(_) => stub_provider(Platform::Bigbasket, mode),
    };

    Ok(ProviderSet::new(amazon, flipkart, bigbasket).with_deadline(deadline))
}

fn live_provider(provider: LiveProvider) -> Provider {
    tracing::info!(platform = %provider.platform(), "provider: live");
    Provider::Live(provider)
}

fn stub_provider(platform: Platform, mode: ProviderMode) -> Provider {
    if mode == ProviderMode::Live {
        tracing::warn!(%platform, "no credentials configured, falling back to stub");
    } else {
        tracing::info!(%platform, "provider: stub");
    }
    Provider::Stub(StubProvider::new(platform))
}

fn env_secs(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
