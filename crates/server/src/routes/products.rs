//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vitrine_core::DocumentId;

use crate::error::Result;
use crate::state::AppState;

/// Default number of products returned by the list endpoint.
const DEFAULT_LIMIT: i64 = 20;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Response body for a successful create.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: DocumentId,
}

/// List products, newest last (insertion order).
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Value>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let products = state.catalog().list_products(limit).await?;
    Ok(Json(products))
}

/// Fetch one product by slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let product = state.catalog().get_product_by_slug(&slug).await?;
    Ok(Json(product))
}

/// Create a product from a raw JSON payload.
///
/// 400 when the slug is taken, 422 with per-field violations when the
/// payload fails schema validation.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    let id = state.catalog().create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(CreateResponse { id })))
}
