//! Wildlife print shop storefront library.
//!
//! A JSON API over two spreadsheet-backed catalogs, a per-visitor session
//! cart, and form relays (checkout, contact, print inquiry) to spreadsheet
//! web apps. The binary in `main.rs` adds Sentry and the rate limiter.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the storefront router.
///
/// With `limit_forms`, the form routes sit behind the per-IP rate limiter,
/// which needs the peer address (`into_make_service_with_connect_info`) or a
/// proxy client-IP header on every request.
pub fn build_router(state: AppState, limit_forms: bool) -> Router {
    let forms = if limit_forms {
        routes::form_routes().layer(middleware::form_rate_limiter())
    } else {
        routes::form_routes()
    };

    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = &state.config().static_dir;
    let images = ServeDir::new(static_dir.join("images"));
    let placeholder = ServeFile::new(static_dir.join("placeholder.svg"));

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .merge(forms)
        .nest_service("/images", images)
        .route_service(catalog::images::PLACEHOLDER_IMAGE, placeholder)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not touch the sheets.
async fn health() -> &'static str {
    "ok"
}
