//! Stub providers — fabricate plausible quotes without network access.

use rand::Rng;

use crate::catalog::CategoryFilter;
use crate::normalize::format_inr;
use crate::types::{Platform, PriceQuote};

/// Price fabrication profile for one platform.
///
/// Marketplace platforms quote in the thousands, the grocery platform in the
/// tens. The floor keeps jittered prices positive.
#[derive(Debug, Clone)]
struct PriceProfile {
    base_min: u64,
    base_max: u64,
    jitter: i64,
    floor: u64,
}

/// A provider that fabricates quotes, used for local development and when a
/// platform has no credentials configured.
#[derive(Debug)]
pub struct StubProvider {
    platform: Platform,
    profile: PriceProfile,
    assortment: Option<CategoryFilter>,
}

impl StubProvider {
    pub fn new(platform: Platform) -> Self {
        let (profile, assortment) = match platform {
            Platform::Amazon => (
                PriceProfile { base_min: 1000, base_max: 51000, jitter: 1000, floor: 500 },
                None,
            ),
            Platform::Flipkart => (
                PriceProfile { base_min: 1200, base_max: 49200, jitter: 750, floor: 600 },
                None,
            ),
            Platform::Bigbasket => (
                PriceProfile { base_min: 50, base_max: 2050, jitter: 100, floor: 25 },
                Some(CategoryFilter::groceries()),
            ),
        };

        Self { platform, profile, assortment }
    }

    /// Replace the assortment predicate. `None` carries everything.
    pub fn with_assortment(mut self, assortment: Option<CategoryFilter>) -> Self {
        self.assortment = assortment;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn quote(&self, product_name: &str) -> PriceQuote {
        if let Some(filter) = &self.assortment {
            if !filter.carries(product_name) {
                return PriceQuote::not_carried(self.platform);
            }
        }

        let mut rng = rand::thread_rng();
        let base = rng.gen_range(self.profile.base_min..self.profile.base_max) as i64;
        let jitter = rng.gen_range(-self.profile.jitter..=self.profile.jitter);
        let price = base.saturating_add(jitter).max(self.profile.floor as i64) as u64;

        PriceQuote::offer(
            self.platform,
            format_inr(price),
            Some(self.platform.search_url(product_name)),
            Some(product_name.to_string()),
        )
    }
}
