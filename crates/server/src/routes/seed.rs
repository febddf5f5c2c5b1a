//! Demo-data seeding endpoint.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::services::SeedOutcome;
use crate::state::AppState;

/// Seed the demo products if the collection is empty; a repeat call is a
/// no-op with an "already present" message.
pub async fn run(State(state): State<AppState>) -> Result<Json<SeedOutcome>> {
    let outcome = state.catalog().seed().await?;
    Ok(Json(outcome))
}
