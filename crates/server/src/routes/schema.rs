//! Schema introspection endpoint.
//!
//! Serves the machine-readable entity descriptions so external tools can
//! render forms or validate documents without reading source code. Built
//! purely from the static schema registry: this endpoint keeps working
//! when the document store is down.

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use vitrine_core::{SchemaDescription, schema};

/// `/schema` response body.
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Entity name to schema description.
    pub models: BTreeMap<&'static str, SchemaDescription>,
}

/// Describe every defined entity.
pub async fn show() -> Json<SchemaResponse> {
    let models = schema::entity_names()
        .iter()
        .filter_map(|name| schema::entity(name).map(|entity| (*name, entity.describe())))
        .collect();

    Json(SchemaResponse { models })
}
