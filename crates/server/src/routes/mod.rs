//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Running message
//! GET  /health                 - Liveness (in main.rs)
//! GET  /health/ready           - Readiness, checks the store (in main.rs)
//!
//! # Products
//! GET  /api/products           - List products (?limit=, default 20)
//! GET  /api/products/{slug}    - Product by slug
//! POST /api/products           - Create product
//!
//! # Tooling
//! POST /seed                   - Idempotent demo-data seed
//! GET  /schema                 - Entity schema descriptions (no storage)
//! ```

pub mod products;
pub mod schema;
pub mod seed;

use axum::{
    Json,
    Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Running message, mirroring the API's banner endpoint.
async fn root() -> Json<Value> {
    Json(json!({"message": "Vitrine Commerce API running"}))
}

/// Create the product API router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{slug}", get(products::show))
}

/// Create all routes for the catalog API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/api/products", product_routes())
        .route("/seed", post(seed::run))
        .route("/schema", get(schema::show))
}
