//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::catalog::{Catalog, CatalogError, CatalogKind, FallbackStore, SheetClient};
use crate::config::{OrderFailurePolicy, StorefrontConfig};
use crate::services::{SheetWebhook, WebhookError, WebhookKind};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),
    #[error("webhook client: {0}")]
    Webhook(#[from] WebhookError),
}

/// A catalog fed by a published sheet.
pub type SheetCatalog = Catalog<SheetClient>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalogs, the form relays and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<SheetCatalog>,
    limited_edition: Arc<SheetCatalog>,
    order_webhook: SheetWebhook,
    contact_webhook: SheetWebhook,
    inquiry_webhook: SheetWebhook,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let sheets = &config.sheets;
        let store = sheet_catalog(
            CatalogKind::Store,
            sheets.store_csv_url.clone(),
            sheets.store_timeout,
            sheets.store_fallback_path.clone(),
            sheets.load_timeout,
        )?;
        let limited_edition = sheet_catalog(
            CatalogKind::LimitedEdition,
            sheets.limited_edition_csv_url.clone(),
            sheets.limited_edition_timeout,
            sheets.limited_edition_fallback_path.clone(),
            sheets.load_timeout,
        )?;

        let http = SheetWebhook::http_client()?;
        let hooks = &config.webhooks;
        let order_webhook = SheetWebhook::new(
            http.clone(),
            hooks.order_url.clone(),
            WebhookKind::Order,
            hooks.timeout,
        );
        let contact_webhook = SheetWebhook::new(
            http.clone(),
            hooks.contact_url.clone(),
            WebhookKind::Contact,
            hooks.timeout,
        );
        let inquiry_webhook = SheetWebhook::new(
            http,
            hooks.inquiry_url.clone(),
            WebhookKind::Inquiry,
            hooks.timeout,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Arc::new(store),
                limited_edition: Arc::new(limited_edition),
                order_webhook,
                contact_webhook,
                inquiry_webhook,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn order_failure_policy(&self) -> OrderFailurePolicy {
        self.inner.config.order_failure_policy
    }

    /// The catalog for `kind`.
    #[must_use]
    pub fn catalog(&self, kind: CatalogKind) -> &Arc<SheetCatalog> {
        match kind {
            CatalogKind::Store => &self.inner.store,
            CatalogKind::LimitedEdition => &self.inner.limited_edition,
        }
    }

    #[must_use]
    pub fn order_webhook(&self) -> &SheetWebhook {
        &self.inner.order_webhook
    }

    #[must_use]
    pub fn contact_webhook(&self) -> &SheetWebhook {
        &self.inner.contact_webhook
    }

    #[must_use]
    pub fn inquiry_webhook(&self) -> &SheetWebhook {
        &self.inner.inquiry_webhook
    }
}

fn sheet_catalog(
    kind: CatalogKind,
    url: Url,
    fetch_timeout: Duration,
    fallback_path: Option<PathBuf>,
    load_timeout: Duration,
) -> Result<SheetCatalog, CatalogError> {
    let source = SheetClient::new(url, fetch_timeout)?;
    let fallback = fallback_path.map_or(FallbackStore::Builtin(kind), FallbackStore::File);
    Ok(Catalog::new(kind, source, fallback, load_timeout))
}
