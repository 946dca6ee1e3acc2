//! Handler errors and their JSON responses.
//!
//! Relay and session failures are captured to Sentry before the response is
//! built; validation and lookup failures are the visitor's and are not.
//! Catalog loads never surface here: they settle on fallback data instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::models::FormError;
use crate::services::WebhookError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Relaying a form to its sheet failed.
    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    /// Submitted form failed validation.
    #[error("{0}")]
    Form(#[from] FormError),

    /// Session store failure.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No product with this id in the catalog as loaded now.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Webhook(_) | Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Webhook(_) => StatusCode::BAD_GATEWAY,
            Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Relay errors may carry the sheet's reply; keep those server-side
        let message = match &self {
            Self::Session(_) => "Your session could not be loaded. Please refresh the page.".to_string(),
            Self::Webhook(_) => "Something went wrong. Please try again.".to_string(),
            Self::Form(_) | Self::NotFound(_) => self.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product le-999".to_string());
        assert_eq!(err.to_string(), "Not found: product le-999");

        let err = AppError::Form(FormError::MissingField("City"));
        assert_eq!(err.to_string(), "City is required");
    }

    #[tokio::test]
    async fn test_webhook_error_hides_details() {
        let err = AppError::Webhook(WebhookError::Status {
            status: 500,
            body: "Exception: sheet Orders not found".to_string(),
        });
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(!body["message"].as_str().unwrap().contains("Orders"));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Form(FormError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Form(FormError::MissingField("Location"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Webhook(WebhookError::Timeout(Duration::from_secs(10)))),
            StatusCode::BAD_GATEWAY
        );
    }
}
