//! Checkout route handler.
//!
//! Checkout relays the order to the order sheet; payment is arranged by the
//! studio afterwards. What happens when the relay fails depends on
//! [`OrderFailurePolicy`].

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;
use wildlife_prints_core::{CartAction, OrderId};

use crate::config::OrderFailurePolicy;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{CheckoutForm, OrderSubmission};
use crate::routes::cart::{dispatch, load_cart};
use crate::state::AppState;

/// Response for a placed order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: OrderId,
}

/// POST /api/checkout
#[instrument(skip(state, session, form), fields(payment_method = %form.payment_method))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let cart = load_cart(&session).await?;
    let order = OrderSubmission::new(&form, &cart, Utc::now())?;
    let order_id = order.order_id.clone();

    add_breadcrumb(
        "checkout",
        "Order submitted",
        Some(&[("order_id", order_id.as_str())]),
    );

    match state.order_webhook().submit(&order).await {
        Ok(()) => {
            tracing::info!(order_id = %order_id, total = %order.total, "Order relayed");
        }
        Err(err) => match state.order_failure_policy() {
            OrderFailurePolicy::Mask => {
                let event_id = sentry::capture_error(&err);
                tracing::error!(
                    order_id = %order_id,
                    error = %err,
                    sentry_event_id = %event_id,
                    "Order relay failed, confirming to customer anyway"
                );
            }
            OrderFailurePolicy::Report => return Err(AppError::Webhook(err)),
        },
    }

    dispatch(&session, CartAction::ClearCart).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        order_id,
    }))
}
