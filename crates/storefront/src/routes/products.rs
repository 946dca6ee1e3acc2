//! Catalog route handlers.
//!
//! Every request loads its catalog afresh: one sheet fetch, raced against the
//! load timeout, with fallback data substituted on failure. The response says
//! where the products came from and carries the load error, if any.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;
use wildlife_prints_core::{Product, ProductId};

use crate::catalog::{CatalogKind, CatalogOrigin, CatalogQuery, categories};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing for one catalog.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub catalog: &'static str,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub origin: CatalogOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of data-quality issues found in the sheet.
    pub issues: usize,
}

/// One product of a catalog.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
    pub origin: CatalogOrigin,
}

async fn listing(state: &AppState, kind: CatalogKind, query: &CatalogQuery) -> ListingResponse {
    let snapshot = state.catalog(kind).load().await;
    ListingResponse {
        catalog: kind.as_str(),
        products: query.apply(&snapshot.products),
        categories: categories(&snapshot.products),
        origin: snapshot.origin,
        error: snapshot.error,
        issues: snapshot.issues.len(),
    }
}

async fn product(state: &AppState, kind: CatalogKind, id: ProductId) -> Result<ProductResponse> {
    let snapshot = state.catalog(kind).load().await;
    let product = snapshot
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("{kind} product {id}")))?;
    Ok(ProductResponse {
        product,
        origin: snapshot.origin,
    })
}

/// GET /api/store/products
#[instrument(skip(state))]
pub async fn store_index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ListingResponse> {
    Json(listing(&state, CatalogKind::Store, &query).await)
}

/// GET /api/store/products/{id}
#[instrument(skip(state))]
pub async fn store_show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    product(&state, CatalogKind::Store, id).await.map(Json)
}

/// GET /api/limited-edition/products
#[instrument(skip(state))]
pub async fn limited_edition_index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ListingResponse> {
    Json(listing(&state, CatalogKind::LimitedEdition, &query).await)
}

/// GET /api/limited-edition/products/{id}
#[instrument(skip(state))]
pub async fn limited_edition_show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    product(&state, CatalogKind::LimitedEdition, id)
        .await
        .map(Json)
}
