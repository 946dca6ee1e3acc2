//! Spreadsheet-backed product catalogs.
//!
//! # Pipeline
//!
//! ```text
//! CsvSource::fetch_csv ──▶ csv::parse_sheet ──▶ RecordMapper::map_rows ──▶ CatalogState
//!        │ timeout / error                                                    ▲
//!        └────────────────────────▶ FallbackStore::load ─────────────────────┘
//! ```
//!
//! Two catalogs run the same pipeline with different settings (see
//! [`CatalogKind`]): the print store and the limited edition collection.
//! Each load performs exactly one fetch attempt; there is no caching, retry,
//! or refresh. A failure anywhere in the chain is recorded on the snapshot and
//! replaced wholesale by fallback data.

pub mod csv;
pub mod fallback;
pub mod fetch;
pub mod images;
pub mod loader;
pub mod mapper;
pub mod query;

use std::time::Duration;

use thiserror::Error;

pub use csv::{Column, FieldIssue, ParsedSheet, SheetRow, parse_sheet};
pub use fallback::FallbackStore;
pub use fetch::{CsvSource, SheetClient};
pub use images::ImageResolver;
pub use loader::{Catalog, CatalogHandle, CatalogOrigin, CatalogState};
pub use mapper::{MappedCatalog, RecordMapper};
pub use query::{CatalogQuery, SortOrder, categories};

/// Errors raised while producing a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The sheet (or the whole load) did not answer in time.
    #[error("Request timeout: spreadsheet took longer than {}s to respond", .0.as_secs())]
    FetchTimeout(Duration),

    /// Network-level failure.
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The sheet answered with a non-success status.
    #[error("Fetch error: HTTP {0}")]
    HttpStatus(u16),

    /// An HTML page came back instead of CSV (sheet not shared publicly).
    #[error(
        "Spreadsheet is not publicly accessible. Set sharing to \"Anyone with the link can view\""
    )]
    NotPublic,

    /// The body is not usable CSV.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The sheet parsed but yielded no products.
    #[error("Spreadsheet returned no products")]
    Empty,

    /// The fallback data itself could not be loaded.
    #[error("Fallback unavailable: {0}")]
    FallbackUnavailable(String),
}

/// Which catalog a pipeline serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Open-edition prints on the store page.
    Store,
    /// Numbered limited edition prints.
    LimitedEdition,
}

impl CatalogKind {
    /// Stable name used in logs, routes and the CLI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::LimitedEdition => "limited-edition",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store" => Ok(Self::Store),
            "limited-edition" | "limited" => Ok(Self::LimitedEdition),
            _ => Err(format!("unknown catalog: {s} (expected store or limited-edition)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::FetchTimeout(Duration::from_secs(5)).to_string(),
            "Request timeout: spreadsheet took longer than 5s to respond"
        );
        assert_eq!(CatalogError::HttpStatus(404).to_string(), "Fetch error: HTTP 404");
        assert!(CatalogError::NotPublic.to_string().contains("publicly accessible"));
    }

    #[test]
    fn test_catalog_kind_parse() {
        assert_eq!("store".parse::<CatalogKind>(), Ok(CatalogKind::Store));
        assert_eq!(
            "limited-edition".parse::<CatalogKind>(),
            Ok(CatalogKind::LimitedEdition)
        );
        assert!("blog".parse::<CatalogKind>().is_err());
    }
}
