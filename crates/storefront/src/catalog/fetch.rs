//! Downloading published sheets.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};
use url::Url;

use super::CatalogError;

/// Something that yields the raw CSV text of a catalog sheet.
///
/// The HTTP implementation is [`SheetClient`]; tests substitute in-memory
/// sources.
pub trait CsvSource: Send + Sync + 'static {
    /// Fetch the sheet once.
    fn fetch_csv(&self) -> impl Future<Output = Result<String, CatalogError>> + Send;
}

/// Fetches one published spreadsheet over HTTP.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl SheetClient {
    /// Create a client for `url` that gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/csv,text/plain,*/*"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn download(&self) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Sheet returned non-success status");
            return Err(CatalogError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        debug!(bytes = text.len(), "Sheet downloaded");
        check_body(&text)?;
        Ok(text)
    }

    fn classify(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::FetchTimeout(self.timeout)
        } else {
            CatalogError::Fetch(err)
        }
    }
}

impl CsvSource for SheetClient {
    fn fetch_csv(&self) -> impl Future<Output = Result<String, CatalogError>> + Send {
        self.download()
    }
}

/// Reject bodies that are obviously not a CSV export.
///
/// # Errors
///
/// [`CatalogError::NotPublic`] for an HTML page (the sheet's sign-in
/// interstitial), [`CatalogError::Parse`] for text without a single comma.
pub fn check_body(text: &str) -> Result<(), CatalogError> {
    let head = text.trim_start();
    if head.starts_with("<!DOCTYPE") || head.starts_with("<html") || text.contains("<html") {
        return Err(CatalogError::NotPublic);
    }
    if !text.contains(',') {
        return Err(CatalogError::Parse(
            "response does not look like CSV".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_body_is_not_public() {
        assert!(matches!(
            check_body("<!DOCTYPE html><html><body>Sign in</body></html>"),
            Err(CatalogError::NotPublic)
        ));
        assert!(matches!(
            check_body("  \n<html lang=\"en\">"),
            Err(CatalogError::NotPublic)
        ));
    }

    #[test]
    fn test_body_without_comma_is_parse_error() {
        assert!(matches!(
            check_body("id title price"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_csv_body_accepted() {
        assert!(check_body("id,title,price\n1,Sunset,280\n").is_ok());
    }
}
