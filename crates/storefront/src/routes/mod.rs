//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Catalogs
//! GET  /api/store/products                  - Store listing (?category=&sort=)
//! GET  /api/store/products/{id}             - Store product
//! GET  /api/limited-edition/products        - Limited edition listing (?category=&sort=)
//! GET  /api/limited-edition/products/{id}   - Limited edition product
//!
//! # Cart (session)
//! GET  /api/cart                            - Cart contents and total
//! GET  /api/cart/count                      - Item count badge
//! POST /api/cart/add                        - Add one unit of a store product
//! POST /api/cart/update                     - Set quantity (<= 0 removes)
//! POST /api/cart/remove                     - Remove a line
//! POST /api/cart/clear                      - Empty the cart
//!
//! # Forms (rate limited)
//! POST /api/checkout                        - Relay order, clear cart
//! POST /api/contact                         - Relay contact message
//! POST /api/limited-edition/inquiry         - Relay print inquiry
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the store catalog routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::store_index))
        .route("/products/{id}", get(products::store_show))
}

/// Create the limited edition catalog routes router.
pub fn limited_edition_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::limited_edition_index))
        .route("/products/{id}", get(products::limited_edition_show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the form submission routes router.
///
/// Kept separate so the binary can put a rate limiter in front of them.
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(checkout::submit))
        .route("/api/contact", post(contact::contact))
        .route("/api/limited-edition/inquiry", post(contact::inquiry))
}

/// Create the catalog and cart routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/store", store_routes())
        .nest("/api/limited-edition", limited_edition_routes())
        .nest("/api/cart", cart_routes())
}
