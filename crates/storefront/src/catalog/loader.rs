//! Catalog loading with a timeout race and fallback substitution.
//!
//! A [`Catalog`] owns one pipeline configuration. Every load publishes into a
//! [`CatalogHandle`], which plays the part of a mounted view: consumers watch
//! the snapshot, and once the handle is unmounted no further updates land.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use wildlife_prints_core::{Product, ProductId};

use super::csv::{FieldIssue, parse_sheet};
use super::fallback::FallbackStore;
use super::fetch::CsvSource;
use super::mapper::{MappedCatalog, RecordMapper};
use super::{CatalogError, CatalogKind};

/// Where the products in a snapshot came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// Nothing loaded yet, or the fallback failed too.
    #[default]
    None,
    /// Parsed from the live sheet.
    Live,
    /// Substituted after the live load failed.
    Fallback,
}

/// Snapshot observed by catalog consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub origin: CatalogOrigin,
    pub issues: Vec<FieldIssue>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            loading: true,
            error: None,
            origin: CatalogOrigin::None,
            issues: Vec::new(),
        }
    }
}

impl CatalogState {
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }
}

/// Receives the updates of one load while mounted.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    state: Arc<watch::Sender<CatalogState>>,
    mounted: Arc<AtomicBool>,
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogHandle {
    /// A mounted handle in the initial loading state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            state: Arc::new(state),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every applied update.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Stop accepting updates. In-flight work still runs to completion but
    /// its results are discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Apply `f` unless unmounted. Returns whether the update was applied.
    pub fn update(&self, f: impl FnOnce(&mut CatalogState)) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.state.send_modify(f);
        true
    }
}

/// One spreadsheet-backed catalog.
#[derive(Debug)]
pub struct Catalog<S> {
    kind: CatalogKind,
    source: S,
    mapper: RecordMapper,
    fallback: FallbackStore,
    load_timeout: Duration,
}

impl<S: CsvSource> Catalog<S> {
    #[must_use]
    pub const fn new(
        kind: CatalogKind,
        source: S,
        fallback: FallbackStore,
        load_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            source,
            mapper: RecordMapper::new(kind),
            fallback,
            load_timeout,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        self.kind
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn fallback(&self) -> &FallbackStore {
        &self.fallback
    }

    /// Fetch, parse and map the live sheet once, without fallback.
    ///
    /// # Errors
    ///
    /// Any fetch or parse failure, or [`CatalogError::Empty`] when no row
    /// produced a product.
    #[instrument(skip(self), fields(catalog = %self.kind))]
    pub async fn fetch_products(&self) -> Result<MappedCatalog, CatalogError> {
        let text = self.source.fetch_csv().await?;
        let sheet = parse_sheet(&text)?;
        let mapped = self.mapper.map_rows(&sheet);

        for issue in &mapped.issues {
            warn!(catalog = %self.kind, %issue, "Sheet data issue");
        }
        if mapped.products.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(mapped)
    }

    /// Run one load, publishing into `handle`.
    #[instrument(skip(self, handle), fields(catalog = %self.kind))]
    pub async fn load_into(&self, handle: &CatalogHandle) {
        let outcome = tokio::time::timeout(self.load_timeout, self.fetch_products())
            .await
            .unwrap_or(Err(CatalogError::FetchTimeout(self.load_timeout)));

        match outcome {
            Ok(mapped) => {
                info!(
                    products = mapped.products.len(),
                    issues = mapped.issues.len(),
                    "Catalog loaded from sheet"
                );
                handle.update(|state| {
                    state.products = mapped.products;
                    state.issues = mapped.issues;
                    state.origin = CatalogOrigin::Live;
                    state.error = None;
                });
            }
            Err(err) => {
                warn!(error = %err, "Sheet load failed, using fallback data");
                let message = err.to_string();
                handle.update(|state| state.error = Some(message));

                match self.fallback.load().await {
                    Ok(products) => {
                        handle.update(|state| {
                            state.products = products;
                            state.origin = CatalogOrigin::Fallback;
                        });
                    }
                    Err(fallback_err) => {
                        error!(error = %fallback_err, "Fallback data unavailable");
                    }
                }
            }
        }

        handle.update(|state| state.loading = false);
    }

    /// Start a load in the background and return its handle immediately.
    pub fn mount(self: Arc<Self>) -> CatalogHandle {
        let handle = CatalogHandle::new();
        let task_handle = handle.clone();
        tokio::spawn(async move {
            self.load_into(&task_handle).await;
        });
        handle
    }

    /// Load to completion and return the settled snapshot.
    pub async fn load(&self) -> CatalogState {
        let handle = CatalogHandle::new();
        self.load_into(&handle).await;
        handle.snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use wildlife_prints_core::Price;

    use super::*;
    use crate::catalog::fallback;

    struct StaticCsv(&'static str);

    impl CsvSource for StaticCsv {
        async fn fetch_csv(&self) -> Result<String, CatalogError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    impl CsvSource for FailingSource {
        async fn fetch_csv(&self) -> Result<String, CatalogError> {
            Err(CatalogError::HttpStatus(500))
        }
    }

    struct SlowSource(Duration);

    impl CsvSource for SlowSource {
        async fn fetch_csv(&self) -> Result<String, CatalogError> {
            tokio::time::sleep(self.0).await;
            Ok("id,title,price\n1,Late,1\n".to_string())
        }
    }

    fn store<S: CsvSource>(source: S, timeout: Duration) -> Catalog<S> {
        Catalog::new(
            CatalogKind::Store,
            source,
            FallbackStore::Builtin(CatalogKind::Store),
            timeout,
        )
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = CatalogHandle::new().snapshot();
        assert!(state.loading);
        assert!(state.products.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_live_load() {
        let catalog = store(
            StaticCsv("id,title,price\n1,Sunset Serenity Print,280\n2,Golden Hour,oops\n"),
            Duration::from_secs(8),
        );
        let state = catalog.load().await;

        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.origin, CatalogOrigin::Live);
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[1].price, Price::zero());
        assert_eq!(state.issues.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_substitutes_fallback() {
        let state = store(FailingSource, Duration::from_secs(8)).load().await;

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Fetch error: HTTP 500"));
        assert_eq!(state.origin, CatalogOrigin::Fallback);
        assert_eq!(state.products, fallback::builtin(CatalogKind::Store));
    }

    #[tokio::test]
    async fn test_header_only_sheet_uses_fallback() {
        let state = store(StaticCsv("id,title,price\n"), Duration::from_secs(8))
            .load()
            .await;
        assert_eq!(state.error.as_deref(), Some("Spreadsheet returned no products"));
        assert_eq!(state.products.len(), 11);
    }

    #[tokio::test]
    async fn test_timeout_substitutes_fallback() {
        let catalog = store(SlowSource(Duration::from_secs(30)), Duration::from_millis(50));
        let state = catalog.load().await;

        assert!(!state.loading);
        assert!(state.error.unwrap().starts_with("Request timeout"));
        assert_eq!(state.origin, CatalogOrigin::Fallback);
        assert_eq!(state.products.len(), 11);
    }

    #[tokio::test]
    async fn test_fallback_failure_leaves_products_empty() {
        let catalog = Catalog::new(
            CatalogKind::LimitedEdition,
            FailingSource,
            FallbackStore::File(PathBuf::from("/nonexistent/limited.json")),
            Duration::from_secs(8),
        );
        let state = catalog.load().await;

        assert!(!state.loading);
        assert!(state.error.is_some());
        assert!(state.products.is_empty());
        assert_eq!(state.origin, CatalogOrigin::None);
    }

    #[tokio::test]
    async fn test_mount_publishes_settled_state() {
        let catalog = Arc::new(store(
            StaticCsv("id,title,price\n3,Bengal Tiger Portrait,420\n"),
            Duration::from_secs(8),
        ));
        let handle = catalog.mount();
        let mut rx = handle.subscribe();

        let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.loading))
            .await
            .unwrap()
            .unwrap()
            .clone();
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].name, "Bengal Tiger Portrait");
    }

    #[tokio::test]
    async fn test_unmounted_handle_ignores_updates() {
        let catalog = Arc::new(store(
            SlowSource(Duration::from_millis(100)),
            Duration::from_secs(8),
        ));
        let handle = catalog.mount();
        handle.unmount();

        tokio::time::sleep(Duration::from_millis(300)).await;

        let state = handle.snapshot();
        assert!(state.loading);
        assert!(state.products.is_empty());
        assert!(!handle.update(|s| s.loading = false));
    }

    #[test]
    fn test_find_by_id() {
        let state = CatalogState {
            products: fallback::builtin(CatalogKind::LimitedEdition),
            loading: false,
            ..CatalogState::default()
        };
        assert_eq!(
            state.find(&ProductId::new("le-003")).map(|p| p.name.as_str()),
            Some("Bull Power")
        );
        assert!(state.find(&ProductId::new("le-999")).is_none());
    }
}
