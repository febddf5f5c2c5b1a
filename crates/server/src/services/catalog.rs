//! Catalog service: product rules on top of the generic document store.
//!
//! The store itself is entity-agnostic; everything product-specific lives
//! here. The one cross-record invariant - no two products share a slug -
//! is enforced by this service at write time via a check-then-insert
//! sequence. That sequence is not atomic against concurrent callers: two
//! simultaneous creates with the same slug can both pass the check. The
//! store carries no unique constraint on the slug, matching the contract;
//! deployments needing the stronger guarantee add a partial unique index
//! on `(collection, doc->>'slug')` out of band.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use vitrine_core::{DocumentId, ValidationError, schema};

use crate::db::{Document, DocumentStore, StoreError};

/// Name of the collection holding product documents.
pub const PRODUCT_COLLECTION: &str = "product";

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The payload failed product schema validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A product with the requested slug already exists.
    #[error("slug already exists")]
    DuplicateSlug,

    /// No product matches the requested slug.
    #[error("product not found")]
    NotFound,

    /// A seed fixture could not be encoded. Indicates a bug in the
    /// fixtures, not bad caller input.
    #[error("failed to encode seed fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Product operations over an injected [`DocumentStore`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    /// Create a catalog service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Whether the backing store currently answers queries. Used by the
    /// readiness probe.
    pub async fn storage_ready(&self) -> bool {
        self.store.count(PRODUCT_COLLECTION).await.is_ok()
    }

    /// Up to `limit` products in insertion order, each with its opaque
    /// store id merged in as the public `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the store fails.
    pub async fn list_products(&self, limit: i64) -> Result<Vec<Value>, CatalogError> {
        let docs = self
            .store
            .find(PRODUCT_COLLECTION, &Map::new(), limit)
            .await?;
        Ok(docs.into_iter().map(public_record).collect())
    }

    /// The product with the given slug.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no product has the slug,
    /// [`CatalogError::Store`] if the store fails.
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Value, CatalogError> {
        let doc = self
            .store
            .find_one(PRODUCT_COLLECTION, &slug_filter(slug))
            .await?;

        doc.map(public_record).ok_or(CatalogError::NotFound)
    }

    /// Create a product from a raw payload.
    ///
    /// The slug-uniqueness check runs first, before validation, so a taken
    /// slug is reported even for an otherwise-invalid payload. The payload
    /// is then validated against the product schema (every violated field
    /// reported) and the normalised record is persisted.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateSlug`], [`CatalogError::Invalid`], or
    /// [`CatalogError::Store`].
    pub async fn create_product(&self, payload: &Value) -> Result<DocumentId, CatalogError> {
        if let Some(slug) = payload.get("slug").and_then(Value::as_str) {
            let existing = self
                .store
                .find_one(PRODUCT_COLLECTION, &slug_filter(slug))
                .await?;
            if existing.is_some() {
                return Err(CatalogError::DuplicateSlug);
            }
        }

        let normalised = schema::product().validate(payload)?;
        let id = self.store.insert(PRODUCT_COLLECTION, normalised).await?;
        tracing::info!(id = %id, "product created");
        Ok(id)
    }
}

fn slug_filter(slug: &str) -> Map<String, Value> {
    let mut filter = Map::new();
    filter.insert("slug".to_owned(), Value::String(slug.to_owned()));
    filter
}

/// Merge the opaque store id into the record as the public `id` field.
/// The store's native identifier representation never appears here.
fn public_record(doc: Document) -> Value {
    let mut data = doc.data;
    data.insert("id".to_owned(), Value::String(doc.id.into()));
    Value::Object(data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    fn widget_payload(slug: &str) -> Value {
        json!({
            "title": "Widget",
            "slug": slug,
            "price": 10.0,
            "category": "hardware",
        })
    }

    #[tokio::test]
    async fn test_create_then_get_by_slug() {
        let catalog = service();

        let id = catalog.create_product(&widget_payload("widget")).await.unwrap();
        assert!(!id.as_str().is_empty());

        let product = catalog.get_product_by_slug("widget").await.unwrap();
        assert_eq!(product["title"], "Widget");
        assert_eq!(product["id"], json!(id.as_str()));
        // Defaults were normalised in before persisting.
        assert_eq!(product["rating"], json!(5.0));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_on_second_create() {
        let catalog = service();

        catalog.create_product(&widget_payload("widget")).await.unwrap();
        let err = catalog
            .create_product(&widget_payload("widget"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug));
    }

    #[tokio::test]
    async fn test_duplicate_slug_reported_before_validation() {
        let catalog = service();
        catalog.create_product(&widget_payload("widget")).await.unwrap();

        // Invalid payload, but the slug is already taken: the duplicate wins.
        let err = catalog
            .create_product(&json!({"slug": "widget", "price": -1}))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug));
    }

    #[tokio::test]
    async fn test_invalid_payload_reports_every_field() {
        let catalog = service();

        let err = catalog
            .create_product(&json!({"slug": "widget", "price": -1, "rating": 7}))
            .await
            .unwrap_err();

        let CatalogError::Invalid(validation) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let fields: Vec<&str> = validation
            .violations
            .iter()
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(fields, vec!["title", "price", "category", "rating"]);
    }

    #[tokio::test]
    async fn test_get_missing_slug_is_not_found() {
        let catalog = service();
        let err = catalog.get_product_by_slug("ghost").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let catalog = service();
        for slug in ["a", "b", "c"] {
            let mut payload = widget_payload(slug);
            payload["title"] = json!(slug.to_uppercase());
            catalog.create_product(&payload).await.unwrap();
        }

        assert_eq!(catalog.list_products(2).await.unwrap().len(), 2);
        assert_eq!(catalog.list_products(20).await.unwrap().len(), 3);
        assert!(catalog.list_products(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listed_records_expose_id_as_text() {
        let catalog = service();
        catalog.create_product(&widget_payload("widget")).await.unwrap();

        let products = catalog.list_products(20).await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0]["id"].is_string());
        assert!(!products[0]["id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_store_error() {
        let catalog = CatalogService::new(Arc::new(crate::db::PgStore::unavailable()));

        assert!(!catalog.storage_ready().await);
        let err = catalog.list_products(20).await.unwrap_err();
        assert!(matches!(err, CatalogError::Store(StoreError::Unavailable)));
    }
}
