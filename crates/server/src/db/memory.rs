//! In-memory document store.
//!
//! Backs the test suite (and local experimentation) so nothing needs a
//! running `PostgreSQL`. Semantics mirror [`super::PgStore`]: insertion
//! order on reads, top-level key equality for filters, opaque sequential
//! ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use vitrine_core::DocumentId;

use super::{Document, DocumentStore, StoreError};

/// In-process [`DocumentStore`] keyed by collection name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&self) -> DocumentId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        DocumentId::new(format!("mem-{n}"))
    }
}

/// Top-level key equality, the same result `jsonb` containment gives for
/// the flat filters this system uses.
fn matches(filter: &Map<String, Value>, data: &Map<String, Value>) -> bool {
    filter.iter().all(|(key, want)| data.get(key) == Some(want))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        doc: Map<String, Value>,
    ) -> Result<DocumentId, StoreError> {
        let id = self.assign_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(Document {
                id: id.clone(),
                data: doc,
            });
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(filter, &doc.data))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(filter, &doc.data)).cloned()))
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(slug: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("slug".to_owned(), json!(slug));
        map
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert("product", doc("a")).await.unwrap();
        let b = store.insert("product", doc("b")).await.unwrap();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order_and_limit() {
        let store = MemoryStore::new();
        for slug in ["a", "b", "c"] {
            store.insert("product", doc(slug)).await.unwrap();
        }

        let all = store.find("product", &Map::new(), 20).await.unwrap();
        let slugs: Vec<&str> = all.iter().map(|d| d.data["slug"].as_str().unwrap()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);

        let two = store.find("product", &Map::new(), 2).await.unwrap();
        assert_eq!(two.len(), 2);
    }

    #[tokio::test]
    async fn test_non_positive_limit_returns_empty() {
        let store = MemoryStore::new();
        store.insert("product", doc("a")).await.unwrap();

        assert!(store.find("product", &Map::new(), 0).await.unwrap().is_empty());
        assert!(store.find("product", &Map::new(), -3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_matches_top_level_keys() {
        let store = MemoryStore::new();
        store.insert("product", doc("a")).await.unwrap();
        store.insert("product", doc("b")).await.unwrap();

        let hit = store.find_one("product", &doc("b")).await.unwrap();
        assert_eq!(hit.unwrap().data["slug"], json!("b"));

        let miss = store.find_one("product", &doc("zzz")).await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store.insert("product", doc("a")).await.unwrap();

        assert_eq!(store.count("product").await.unwrap(), 1);
        assert_eq!(store.count("user").await.unwrap(), 0);
        assert!(store.find("user", &Map::new(), 20).await.unwrap().is_empty());
    }
}
