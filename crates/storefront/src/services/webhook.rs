//! Relay of form submissions to spreadsheet web apps.
//!
//! Each form posts a flat JSON object to its own web app URL, which appends
//! a row to a sheet. Responses are checked for status only; the body is not
//! interpreted.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Errors that can occur when relaying a submission.
///
/// Messages never include the webhook URL.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// No response within the configured timeout.
    #[error("Webhook timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The web app answered with a non-success status.
    #[error("Webhook returned HTTP {status}")]
    Status { status: u16, body: String },
}

/// Which form a webhook receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Order,
    Contact,
    Inquiry,
}

impl WebhookKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Contact => "contact",
            Self::Inquiry => "inquiry",
        }
    }
}

/// Client for one spreadsheet web app endpoint.
#[derive(Clone)]
pub struct SheetWebhook {
    client: reqwest::Client,
    url: SecretString,
    kind: WebhookKind,
    timeout: Duration,
}

impl std::fmt::Debug for SheetWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetWebhook")
            .field("kind", &self.kind)
            .field("url", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SheetWebhook {
    /// Create a webhook client sharing `client`'s connection pool.
    #[must_use]
    pub const fn new(
        client: reqwest::Client,
        url: SecretString,
        kind: WebhookKind,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url,
            kind,
            timeout,
        }
    }

    /// Build the shared HTTP client used by every webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn http_client() -> Result<reqwest::Client, WebhookError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WebhookError::Http(e.without_url()))
    }

    #[must_use]
    pub const fn kind(&self) -> WebhookKind {
        self.kind
    }

    /// POST `payload` as JSON.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, timeout, or a non-success status.
    #[instrument(skip(self, payload), fields(webhook = self.kind.as_str()))]
    pub async fn submit<T: Serialize + Sync>(&self, payload: &T) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(self.url.expose_secret())
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            warn!(status = %status, body = %body, "Webhook returned non-success status");
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = %status, "Submission relayed");
        Ok(())
    }

    fn classify(&self, err: reqwest::Error) -> WebhookError {
        if err.is_timeout() {
            WebhookError::Timeout(self.timeout)
        } else {
            WebhookError::Http(err.without_url())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_url() {
        let webhook = SheetWebhook::new(
            reqwest::Client::new(),
            SecretString::from("https://script.example/macros/s/deployment-id/exec"),
            WebhookKind::Contact,
            Duration::from_secs(10),
        );
        let debug_output = format!("{webhook:?}");
        assert!(debug_output.contains("Contact"));
        assert!(!debug_output.contains("deployment-id"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WebhookError::Timeout(Duration::from_secs(10)).to_string(),
            "Webhook timed out after 10s"
        );
        let err = WebhookError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Webhook returned HTTP 500");
    }
}
