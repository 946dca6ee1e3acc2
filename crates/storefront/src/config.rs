//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `STORE_SHEET_CSV_URL` - Published CSV export of the print store sheet
//! - `LIMITED_EDITION_SHEET_CSV_URL` - Published CSV export of the limited edition sheet
//! - `ORDER_WEBHOOK_URL` - Web app URL that appends checkout orders to a sheet
//! - `CONTACT_WEBHOOK_URL` - Web app URL for contact form messages
//! - `INQUIRY_WEBHOOK_URL` - Web app URL for limited edition print inquiries
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STORE_SHEET_TIMEOUT_SECS` - Store sheet fetch timeout (default: 5)
//! - `LIMITED_EDITION_SHEET_TIMEOUT_SECS` - Limited edition fetch timeout (default: 8)
//! - `CATALOG_LOAD_TIMEOUT_SECS` - Whole-load timeout per catalog (default: 8)
//! - `WEBHOOK_TIMEOUT_SECS` - Form relay timeout (default: 10)
//! - `ORDER_FAILURE_POLICY` - `mask` or `report` (default: mask)
//! - `STORE_FALLBACK_PATH` - JSON file replacing the built-in store fallback
//! - `LIMITED_EDITION_FALLBACK_PATH` - JSON file replacing the built-in limited edition fallback
//! - `STOREFRONT_STATIC_DIR` - Directory with `images/` (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What checkout does when the order webhook fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderFailurePolicy {
    /// Log and report the failure, but tell the customer the order went
    /// through and clear the cart.
    #[default]
    Mask,
    /// Keep the cart and return an error to the customer.
    Report,
}

impl FromStr for OrderFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mask" => Ok(Self::Mask),
            "report" => Ok(Self::Report),
            other => Err(format!("expected mask or report, got {other}")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog sheet configuration
    pub sheets: SheetsConfig,
    /// Form relay configuration
    pub webhooks: WebhookConfig,
    /// Checkout behaviour when the order relay fails
    pub order_failure_policy: OrderFailurePolicy,
    /// Root of the static files (`images/...`)
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Published spreadsheets backing the two catalogs.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub store_csv_url: Url,
    pub limited_edition_csv_url: Url,
    pub store_timeout: Duration,
    pub limited_edition_timeout: Duration,
    /// Upper bound on one whole catalog load, fetch and parse included.
    pub load_timeout: Duration,
    pub store_fallback_path: Option<PathBuf>,
    pub limited_edition_fallback_path: Option<PathBuf>,
}

/// Spreadsheet web app endpoints that receive form submissions.
///
/// The URLs embed deployment ids that allow anyone to write to the sheets,
/// so they are kept secret. Implements `Debug` manually to redact them.
#[derive(Clone)]
pub struct WebhookConfig {
    pub order_url: SecretString,
    pub contact_url: SecretString,
    pub inquiry_url: SecretString,
    pub timeout: Duration,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("order_url", &"[REDACTED]")
            .field("contact_url", &"[REDACTED]")
            .field("inquiry_url", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        parse_url("STOREFRONT_BASE_URL", &base_url)?;

        let order_failure_policy =
            parse_env_or_default::<OrderFailurePolicy>("ORDER_FAILURE_POLICY", "mask")?;

        Ok(Self {
            host,
            port,
            base_url,
            sheets: SheetsConfig::from_env()?,
            webhooks: WebhookConfig::from_env()?,
            order_failure_policy,
            static_dir: PathBuf::from(get_env_or_default(
                "STOREFRONT_STATIC_DIR",
                "crates/storefront/static",
            )),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SheetsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store_csv_url: get_required_url("STORE_SHEET_CSV_URL")?,
            limited_edition_csv_url: get_required_url("LIMITED_EDITION_SHEET_CSV_URL")?,
            store_timeout: get_secs_or_default("STORE_SHEET_TIMEOUT_SECS", 5)?,
            limited_edition_timeout: get_secs_or_default("LIMITED_EDITION_SHEET_TIMEOUT_SECS", 8)?,
            load_timeout: get_secs_or_default("CATALOG_LOAD_TIMEOUT_SECS", 8)?,
            store_fallback_path: get_optional_env("STORE_FALLBACK_PATH").map(PathBuf::from),
            limited_edition_fallback_path: get_optional_env("LIMITED_EDITION_FALLBACK_PATH")
                .map(PathBuf::from),
        })
    }
}

impl WebhookConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            order_url: get_required_url_secret("ORDER_WEBHOOK_URL")?,
            contact_url: get_required_url_secret("CONTACT_WEBHOOK_URL")?,
            inquiry_url: get_required_url_secret("INQUIRY_WEBHOOK_URL")?,
            timeout: get_secs_or_default("WEBHOOK_TIMEOUT_SECS", 10)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable (empty counts as unset).
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = parse_value::<u64>(key, raw)?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn get_secs_or_default(key: &str, default: u64) -> Result<Duration, ConfigError> {
    get_optional_env(key).map_or(Ok(Duration::from_secs(default)), |raw| {
        parse_secs(key, &raw)
    })
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn get_required_url(key: &str) -> Result<Url, ConfigError> {
    parse_url(key, &get_required_env(key)?)
}

/// Get a required URL as a secret. The error never echoes the value.
fn get_required_url_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = SecretString::from(get_required_env(key)?);
    parse_url(key, value.expose_secret()).map_err(|_| {
        ConfigError::InvalidEnvVar(key.to_string(), "not a valid http(s) URL".to_string())
    })?;
    Ok(value)
}
