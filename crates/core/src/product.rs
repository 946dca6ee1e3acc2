//! Product records as shown in a catalog snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A print offered in one of the catalogs.
///
/// Image fields hold served paths (e.g. `/images/products/...jpg`), never
/// raw spreadsheet filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within one catalog snapshot.
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Short description shown on listing cards.
    pub description: String,
    /// Long description for the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Print size, e.g. `A3` (limited edition catalog).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Primary image path.
    pub image: String,
    /// Additional image paths in display order.
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Spreadsheet columns without a dedicated field, keyed by header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Product {
    /// Product with the required fields set and everything optional empty.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
            full_description: None,
            category: None,
            size: None,
            image: image.into(),
            gallery: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Long description if present, otherwise the short one.
    #[must_use]
    pub fn long_description(&self) -> &str {
        self.full_description
            .as_deref()
            .unwrap_or(&self.description)
    }
}
