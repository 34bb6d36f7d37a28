//! Assortment heuristics: which products a platform plausibly carries.

/// Grocery and household keywords for the BigBasket assortment check.
/// Sample data, not a statement about the real catalog.
const GROCERY_KEYWORDS: &[&str] = &[
    "rice", "dal", "oil", "flour", "sugar", "salt", "spices", "tea", "coffee",
    "milk", "bread", "eggs", "vegetables", "fruits", "snacks", "biscuits",
    "soap", "shampoo", "detergent", "toothpaste", "tissue", "cleaning",
];

/// A keyword predicate deciding whether a platform carries a product.
///
/// A miss means "not carried" — the provider reports the product unavailable
/// without fabricating a price and without an error.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    keywords: Vec<String>,
}

impl CategoryFilter {
    /// Build a filter from arbitrary keywords.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// The grocery/household assortment used for BigBasket.
    pub fn groceries() -> Self {
        Self::new(GROCERY_KEYWORDS.iter().copied())
    }

    /// Case-insensitive substring match against the product name.
    pub fn carries(&self, product_name: &str) -> bool {
        let name = product_name.to_lowercase();
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}
