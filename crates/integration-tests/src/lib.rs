//! Integration test harness for the wildlife prints storefront.
//!
//! Each test gets its own stand-ins for the outside world, bound to
//! ephemeral ports on localhost:
//!
//! - a sheet server publishing CSV (or the failure modes of a real published
//!   sheet: an HTML sharing page, an error status, a hang)
//! - a webhook sink recording every form row the storefront relays
//!
//! The storefront router itself is driven in-process with
//! `tower::ServiceExt::oneshot`; [`TestClient`] carries the session cookie
//! between requests so cart flows behave like one visitor.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wildlife-prints-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Method, Request, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;
use wildlife_prints_storefront::config::{
    OrderFailurePolicy, SheetsConfig, StorefrontConfig, WebhookConfig,
};
use wildlife_prints_storefront::state::AppState;

/// Store sheet used by most tests.
pub const STORE_CSV: &str = "\
id,title,price,description,category,image
1,Sunset Elephant,280,Elephant at dusk,Mammals,1.jpg
2,Kingfisher,150,A flash of blue,Birds,2.jpg
3,Owl at Night,320,Barn owl in flight,Birds,3.jpg
4,Tiger Portrait,420,Big cat close up,Mammals,4.jpg
";

/// Limited edition sheet used by most tests.
pub const LIMITED_EDITION_CSV: &str = "\
id,title,price,description,category,size
le-101,Snow Leopard,900,Ghost of the mountains,Wildlife,A2
le-102,Grey Heron,650,Still water at dawn,Birds,A3
";

// =============================================================================
// Sheet server
// =============================================================================

/// How the sheet server answers for one published sheet.
#[derive(Debug, Clone)]
pub enum Sheet {
    /// CSV body with status 200.
    Csv(String),
    /// The HTML sign-in page served for a sheet that is not shared publicly.
    Private,
    /// Bare error status.
    Status(StatusCode),
    /// CSV body, sent after a delay.
    Slow(Duration, String),
}

impl Sheet {
    #[must_use]
    pub fn csv(body: &str) -> Self {
        Self::Csv(body.to_string())
    }
}

async fn serve_sheet(
    State(sheets): State<Arc<HashMap<String, Sheet>>>,
    Path(name): Path<String>,
) -> Response {
    match sheets.get(&name) {
        Some(Sheet::Csv(body)) => csv_response(body.clone()),
        Some(Sheet::Private) => Html(
            "<!DOCTYPE html><html><head><title>Sign in</title></head><body></body></html>",
        )
        .into_response(),
        Some(Sheet::Status(status)) => status.into_response(),
        Some(Sheet::Slow(delay, body)) => {
            tokio::time::sleep(*delay).await;
            csv_response(body.clone())
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn csv_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response()
}

/// Serve `sheets` at `http://<addr>/<name>` and return the base URL.
pub async fn spawn_sheet_server(sheets: HashMap<String, Sheet>) -> Url {
    let app = Router::new()
        .route("/{name}", get(serve_sheet))
        .with_state(Arc::new(sheets));
    let addr = spawn(app).await;
    Url::parse(&format!("http://{addr}/")).unwrap()
}

// =============================================================================
// Webhook sink
// =============================================================================

/// One form row received by the sink.
#[derive(Debug, Clone)]
pub struct Received {
    /// `order`, `contact` or `inquiry`.
    pub hook: String,
    pub body: Value,
}

#[derive(Clone)]
struct SinkState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn record(
    State(sink): State<SinkState>,
    Path(hook): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    sink.received.lock().unwrap().push(Received { hook, body });
    (sink.status, Json(serde_json::json!({ "result": "success" })))
}

/// Records the JSON rows posted to `/order`, `/contact` and `/inquiry`.
#[derive(Clone)]
pub struct WebhookSink {
    base: Url,
    received: Arc<Mutex<Vec<Received>>>,
}

impl WebhookSink {
    /// Start a sink that answers every post with `status`.
    pub async fn spawn(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/{hook}", post(record))
            .with_state(SinkState {
                status,
                received: received.clone(),
            });
        let addr = spawn(app).await;
        Self {
            base: Url::parse(&format!("http://{addr}/")).unwrap(),
            received,
        }
    }

    #[must_use]
    pub fn url(&self, hook: &str) -> SecretString {
        SecretString::from(self.base.join(hook).unwrap().to_string())
    }

    /// Every row received so far, in arrival order.
    #[must_use]
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// Rows received by one hook.
    #[must_use]
    pub fn rows(&self, hook: &str) -> Vec<Value> {
        self.received()
            .into_iter()
            .filter(|r| r.hook == hook)
            .map(|r| r.body)
            .collect()
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// =============================================================================
// Storefront under test
// =============================================================================

/// Builder for a storefront wired to a fresh sheet server and webhook sink.
pub struct TestAppBuilder {
    store: Sheet,
    limited_edition: Sheet,
    webhook_status: StatusCode,
    policy: OrderFailurePolicy,
    load_timeout: Duration,
    rate_limited: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            store: Sheet::csv(STORE_CSV),
            limited_edition: Sheet::csv(LIMITED_EDITION_CSV),
            webhook_status: StatusCode::OK,
            policy: OrderFailurePolicy::Mask,
            load_timeout: Duration::from_secs(5),
            rate_limited: false,
        }
    }
}

impl TestAppBuilder {
    #[must_use]
    pub fn store_sheet(mut self, sheet: Sheet) -> Self {
        self.store = sheet;
        self
    }

    #[must_use]
    pub fn limited_edition_sheet(mut self, sheet: Sheet) -> Self {
        self.limited_edition = sheet;
        self
    }

    #[must_use]
    pub const fn webhook_status(mut self, status: StatusCode) -> Self {
        self.webhook_status = status;
        self
    }

    #[must_use]
    pub const fn order_failure_policy(mut self, policy: OrderFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Put the form routes behind the per-IP rate limiter.
    #[must_use]
    pub const fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }

    pub async fn build(self) -> TestApp {
        let sheets = HashMap::from([
            ("store.csv".to_string(), self.store),
            ("limited-edition.csv".to_string(), self.limited_edition),
        ]);
        let sheet_base = spawn_sheet_server(sheets).await;
        let sink = WebhookSink::spawn(self.webhook_status).await;

        let config = StorefrontConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            sheets: SheetsConfig {
                store_csv_url: sheet_base.join("store.csv").unwrap(),
                limited_edition_csv_url: sheet_base.join("limited-edition.csv").unwrap(),
                store_timeout: Duration::from_secs(5),
                limited_edition_timeout: Duration::from_secs(5),
                load_timeout: self.load_timeout,
                store_fallback_path: None,
                limited_edition_fallback_path: None,
            },
            webhooks: WebhookConfig {
                order_url: sink.url("order"),
                contact_url: sink.url("contact"),
                inquiry_url: sink.url("inquiry"),
                timeout: Duration::from_secs(5),
            },
            order_failure_policy: self.policy,
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config).unwrap();
        let router = wildlife_prints_storefront::build_router(state, self.rate_limited);
        TestApp { router, sink }
    }
}

/// A storefront router plus the webhook sink it relays to.
pub struct TestApp {
    pub router: Router,
    pub sink: WebhookSink,
}

impl TestApp {
    #[must_use]
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    /// Storefront with the default sheets and a healthy webhook sink.
    pub async fn spawn() -> Self {
        Self::builder().build().await
    }

    /// A new visitor: no session cookie yet.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
            client_ip: None,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// Status and decoded JSON body (`Value::Null` for non-JSON bodies).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// One visitor, keeping their session cookie across requests.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
    client_ip: Option<String>,
}

impl TestClient {
    /// Report `ip` in `X-Real-IP` on every request, as a proxy would.
    #[must_use]
    pub fn with_client_ip(mut self, ip: &str) -> Self {
        self.client_ip = Some(ip.to_string());
        self
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Raw response, for non-JSON routes.
    pub async fn raw(&mut self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(ip) = &self.client_ip {
            builder = builder.header("x-real-ip", ip);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let response = self.raw(method, uri, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}
