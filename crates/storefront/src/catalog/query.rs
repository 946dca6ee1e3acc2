//! Filtering and ordering of catalog listings.

use std::str::FromStr;

use serde::Deserialize;
use wildlife_prints_core::Product;

/// Label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SortOrder {
    /// Sheet order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Title,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "title" | "name" => Ok(Self::Title),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Query string of a listing request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Filter and order `products` (sheet order in, listing order out).
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        let mut listed: Vec<Product> = products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category.as_deref() == Some(c)))
            .cloned()
            .collect();

        // Stable sorts keep sheet order among equal keys.
        match self.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLow => listed.sort_by(|a, b| a.price.amount().cmp(&b.price.amount())),
            SortOrder::PriceHigh => listed.sort_by(|a, b| b.price.amount().cmp(&a.price.amount())),
            SortOrder::Title => listed.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        listed
    }
}

/// `["All", ...]` followed by each category in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut list = vec![ALL_CATEGORIES.to_string()];
    for category in products.iter().filter_map(|p| p.category.as_deref()) {
        if !list.iter().any(|c| c == category) {
            list.push(category.to_string());
        }
    }
    list
}
