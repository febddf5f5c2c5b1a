//! Document persistence.
//!
//! The persistence adapter is a generic create/read surface over named
//! collections of JSON documents; it knows nothing about entity semantics.
//! It is expressed as the object-safe [`DocumentStore`] trait so the
//! catalog service can hold `Arc<dyn DocumentStore>` and tests can inject
//! [`MemoryStore`] instead of a live database - there is no ambient or
//! global connection anywhere.
//!
//! Backends:
//!
//! - [`PgStore`] - `PostgreSQL`, one `jsonb` row per document (production)
//! - [`MemoryStore`] - in-process, for tests and local experimentation

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use vitrine_core::DocumentId;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No usable connection to the backing store. Every storage-dependent
    /// operation returns this until connectivity is restored.
    #[error("document store is unavailable")]
    Unavailable,

    /// The backend rejected or failed an otherwise-valid operation.
    #[error("document store backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// A document read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier, already in its opaque textual form.
    pub id: DocumentId,
    /// The document body.
    pub data: Map<String, Value>,
}

/// Generic create/read operations against named collections.
///
/// Filters are JSON objects matched by top-level key equality. Reads come
/// back in the store's documented natural order, which for both backends
/// here is insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, returning the store-assigned identifier.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] without a live connection,
    /// [`StoreError::Backend`] for any other backend failure.
    async fn insert(
        &self,
        collection: &str,
        doc: Map<String, Value>,
    ) -> Result<DocumentId, StoreError>;

    /// Up to `limit` matching documents in insertion order.
    ///
    /// A `limit` of zero or below returns an empty list.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::insert`].
    async fn find(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// The first matching document, or `None`. Absence is not an error.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::insert`].
    async fn find_one(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Option<Document>, StoreError>;

    /// Number of documents in the collection.
    ///
    /// # Errors
    ///
    /// See [`DocumentStore::insert`].
    async fn count(&self, collection: &str) -> Result<u64, StoreError>;
}
