//! Catalog sheet commands.
//!
//! `check` runs the live pipeline once (no fallback) and reports what the
//! storefront would see. `fallback` dumps the built-in fallback data as JSON,
//! a starting point for `STORE_FALLBACK_PATH` / `LIMITED_EDITION_FALLBACK_PATH`
//! files.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};
use url::Url;
use wildlife_prints_storefront::catalog::{
    Catalog, CatalogKind, FallbackStore, SheetClient, fallback,
};

/// Environment variable holding the sheet URL for `kind`.
const fn url_env_var(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Store => "STORE_SHEET_CSV_URL",
        CatalogKind::LimitedEdition => "LIMITED_EDITION_SHEET_CSV_URL",
    }
}

/// Fetch, parse and map one sheet and log the result.
///
/// # Arguments
///
/// * `kind` - Which catalog's sheet to check
/// * `url` - Sheet URL; read from the catalog's env var when `None`
/// * `timeout` - Fetch timeout
/// * `rows` - How many mapped products to print
///
/// # Errors
///
/// Returns an error if no URL is configured or the sheet cannot be loaded.
pub async fn check(
    kind: CatalogKind,
    url: Option<Url>,
    timeout: Duration,
    rows: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = match url {
        Some(url) => url,
        None => {
            dotenvy::dotenv().ok();
            let var = url_env_var(kind);
            let raw = std::env::var(var).map_err(|_| format!("{var} not set and no --url given"))?;
            Url::parse(&raw)?
        }
    };

    info!(catalog = %kind, url = %url, "Checking sheet");

    let source = SheetClient::new(url, timeout)?;
    let catalog = Catalog::new(kind, source, FallbackStore::Builtin(kind), timeout);
    let mapped = catalog.fetch_products().await?;

    info!(
        products = mapped.products.len(),
        issues = mapped.issues.len(),
        "Sheet loaded"
    );
    for issue in &mapped.issues {
        warn!("  {issue}");
    }
    for product in mapped.products.iter().take(rows) {
        info!(
            "  {:<8} {:<32} {:>10}  {}",
            product.id.as_str(),
            product.name,
            product.price.display(),
            product.image
        );
    }
    if mapped.products.len() > rows {
        info!("  ... {} more", mapped.products.len() - rows);
    }

    Ok(())
}

/// Write the built-in fallback products for `kind` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn dump_fallback(
    kind: CatalogKind,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = fallback::builtin(kind);
    let json = serde_json::to_string_pretty(&products)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            info!(
                catalog = %kind,
                products = products.len(),
                path = %path.display(),
                "Fallback data written"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_env_vars() {
        assert_eq!(url_env_var(CatalogKind::Store), "STORE_SHEET_CSV_URL");
        assert_eq!(
            url_env_var(CatalogKind::LimitedEdition),
            "LIMITED_EDITION_SHEET_CSV_URL"
        );
    }

    #[test]
    fn test_dump_fallback_to_file() {
        let path = std::env::temp_dir().join(format!("prints-cli-{}.json", std::process::id()));
        dump_fallback(CatalogKind::LimitedEdition, Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 6);
        assert_eq!(value[0]["id"], "le-001");

        std::fs::remove_file(&path).unwrap();
    }
}
