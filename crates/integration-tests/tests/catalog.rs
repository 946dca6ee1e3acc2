//! Catalog listing and product pages, live and on fallback.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::{Method, StatusCode};
use wildlife_prints_integration_tests::{Sheet, TestApp};

fn names(body: &serde_json::Value) -> Vec<&str> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let response = app.client().raw(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_store_listing_from_live_sheet() {
    let app = TestApp::spawn().await;
    let resp = app.client().get("/api/store/products").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["catalog"], "store");
    assert_eq!(resp.body["origin"], "live");
    assert!(resp.body.get("error").is_none());
    assert_eq!(resp.body["issues"], 0);
    assert_eq!(
        names(&resp.body),
        ["Sunset Elephant", "Kingfisher", "Owl at Night", "Tiger Portrait"]
    );
    assert_eq!(
        resp.body["categories"],
        serde_json::json!(["All", "Mammals", "Birds"])
    );
    assert_eq!(resp.body["products"][0]["price"]["amount"].as_f64(), Some(280.0));
}

#[tokio::test]
async fn test_store_listing_filter_and_sort() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let resp = client
        .get("/api/store/products?category=Birds&sort=price-high")
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(names(&resp.body), ["Owl at Night", "Kingfisher"]);
    // Categories always describe the whole catalog
    assert_eq!(resp.body["categories"].as_array().unwrap().len(), 3);

    let resp = client.get("/api/store/products?category=All&sort=title").await;
    assert_eq!(
        names(&resp.body),
        ["Kingfisher", "Owl at Night", "Sunset Elephant", "Tiger Portrait"]
    );

    let resp = client.get("/api/store/products?sort=price-low").await;
    assert_eq!(names(&resp.body)[0], "Kingfisher");
}

#[tokio::test]
async fn test_unknown_sort_is_rejected() {
    let app = TestApp::spawn().await;
    let resp = app.client().get("/api/store/products?sort=random").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_product_page() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let resp = client.get("/api/store/products/3").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["product"]["name"], "Owl at Night");
    assert_eq!(resp.body["product"]["category"], "Birds");
    assert_eq!(resp.body["origin"], "live");

    let resp = client.get("/api/store/products/99").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["success"], false);
}

#[tokio::test]
async fn test_limited_edition_listing_and_page() {
    let app = TestApp::spawn().await;
    let mut client = app.client();

    let resp = client.get("/api/limited-edition/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["catalog"], "limited-edition");
    assert_eq!(names(&resp.body), ["Snow Leopard", "Grey Heron"]);

    let resp = client.get("/api/limited-edition/products/le-102").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["product"]["size"], "A3");

    // Store ids do not leak across catalogs
    let resp = client.get("/api/limited-edition/products/1").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_private_sheet_falls_back() {
    let app = TestApp::builder().store_sheet(Sheet::Private).build().await;
    let resp = app.client().get("/api/store/products").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["origin"], "fallback");
    assert!(
        resp.body["error"]
            .as_str()
            .unwrap()
            .contains("not publicly accessible")
    );
    assert_eq!(resp.body["products"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let app = TestApp::builder()
        .limited_edition_sheet(Sheet::Status(StatusCode::INTERNAL_SERVER_ERROR))
        .build()
        .await;
    let resp = app.client().get("/api/limited-edition/products").await;

    assert_eq!(resp.body["origin"], "fallback");
    assert_eq!(resp.body["error"], "Fetch error: HTTP 500");
    assert_eq!(resp.body["products"][0]["id"], "le-001");
}

#[tokio::test]
async fn test_slow_sheet_times_out_to_fallback() {
    let app = TestApp::builder()
        .store_sheet(Sheet::Slow(Duration::from_secs(3), "id,title,price\n1,Late,1\n".to_string()))
        .load_timeout(Duration::from_millis(200))
        .build()
        .await;
    let resp = app.client().get("/api/store/products").await;

    assert_eq!(resp.body["origin"], "fallback");
    assert!(resp.body["error"].as_str().unwrap().starts_with("Request timeout"));
    assert_ne!(names(&resp.body)[0], "Late");
}

#[tokio::test]
async fn test_header_only_sheet_falls_back() {
    let app = TestApp::builder()
        .store_sheet(Sheet::csv("id,title,price\n"))
        .build()
        .await;
    let resp = app.client().get("/api/store/products").await;

    assert_eq!(resp.body["origin"], "fallback");
    assert_eq!(resp.body["error"], "Spreadsheet returned no products");
}

#[tokio::test]
async fn test_bad_prices_are_counted_not_fatal() {
    let app = TestApp::builder()
        .store_sheet(Sheet::csv(
            "id,title,price\n1,Priced,300\n2,Ask Us,TBD\n3,Negative,-5\n",
        ))
        .build()
        .await;
    let resp = app.client().get("/api/store/products/2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["product"]["price"]["amount"].as_f64(), Some(0.0));

    let resp = app.client().get("/api/store/products").await;
    assert_eq!(resp.body["origin"], "live");
    assert_eq!(resp.body["issues"], 2);
}

#[tokio::test]
async fn test_placeholder_image_is_served() {
    let app = TestApp::spawn().await;
    let response = app
        .client()
        .raw(Method::GET, "/placeholder.svg", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/svg+xml"
    );
}
