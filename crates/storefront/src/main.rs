//! Wildlife print shop storefront - public JSON API.
//!
//! This binary serves the storefront API and product images on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON responses only
//! - Published spreadsheets (CSV) for the store and limited edition catalogs,
//!   with built-in fallback data
//! - In-memory sessions holding each visitor's cart
//! - Spreadsheet web apps receiving orders, contact messages and inquiries

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildlife_prints_storefront::catalog::CatalogKind;
use wildlife_prints_storefront::config::StorefrontConfig;
use wildlife_prints_storefront::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Load both catalogs once in the background and log how they settled, so a
/// sheet that is private or malformed shows up at startup rather than on the
/// first page view.
fn log_catalog_health(state: &AppState) {
    for kind in [CatalogKind::Store, CatalogKind::LimitedEdition] {
        let handle = state.catalog(kind).clone().mount();
        tokio::spawn(async move {
            let mut updates = handle.subscribe();
            if let Ok(settled) = updates.wait_for(|s| !s.loading).await {
                match &settled.error {
                    None => tracing::info!(
                        catalog = %kind,
                        products = settled.products.len(),
                        issues = settled.issues.len(),
                        "Catalog sheet reachable"
                    ),
                    Some(error) => tracing::warn!(
                        catalog = %kind,
                        error = %error,
                        fallback_products = settled.products.len(),
                        "Catalog sheet unavailable at startup"
                    ),
                }
            }
        });
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wildlife_prints_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let addr = config.socket_addr();
    let state = AppState::new(config).expect("Failed to initialize application state");

    log_catalog_health(&state);

    let app = wildlife_prints_storefront::build_router(state, true)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
