//! Cart route handlers.
//!
//! The cart is a plain value kept in the visitor's session. Each mutating
//! handler loads it, applies exactly one [`CartAction`], stores it back and
//! returns the new cart.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use wildlife_prints_core::{Cart, CartAction, LineItem, Price, ProductId};

use crate::catalog::CatalogKind;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub total: Price,
    pub item_count: u32,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u32,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the visitor's cart from the session (empty if none yet).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's cart in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Apply one action to the session cart and persist it.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn dispatch(session: &Session, action: CartAction) -> Result<Cart> {
    let cart = load_cart(session).await?.reduce(action);
    save_cart(session, &cart).await?;
    Ok(cart)
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// GET /api/cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CountResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CountResponse {
        count: cart.item_count(),
    }))
}

/// POST /api/cart/add
///
/// The product is looked up in the store catalog so price and name come
/// from the sheet, never from the client.
#[instrument(skip(state, session), fields(product_id = %body.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let snapshot = state.catalog(CatalogKind::Store).load().await;
    let product = snapshot
        .find(&body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("store product {}", body.product_id)))?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", body.product_id.as_str())]),
    );

    let cart = dispatch(&session, CartAction::AddItem(product)).await?;
    tracing::info!(items = cart.item_count(), "Item added to cart");
    Ok(Json(CartResponse::from(&cart)))
}

/// POST /api/cart/update
#[instrument(skip(session), fields(product_id = %body.product_id, quantity = body.quantity))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<CartResponse>> {
    let cart = dispatch(
        &session,
        CartAction::UpdateQuantity {
            id: body.product_id,
            quantity: body.quantity,
        },
    )
    .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// POST /api/cart/remove
#[instrument(skip(session), fields(product_id = %body.product_id))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveFromCartRequest>,
) -> Result<Json<CartResponse>> {
    let cart = dispatch(&session, CartAction::RemoveItem(body.product_id)).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// POST /api/cart/clear
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartResponse>> {
    let cart = dispatch(&session, CartAction::ClearCart).await?;
    Ok(Json(CartResponse::from(&cart)))
}
