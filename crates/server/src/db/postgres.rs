//! `PostgreSQL` document store backend.
//!
//! Documents live in a single table, one `jsonb` row per document:
//!
//! ```sql
//! CREATE TABLE documents (
//!     id         uuid PRIMARY KEY DEFAULT gen_random_uuid(),
//!     collection text NOT NULL,
//!     doc        jsonb NOT NULL,
//!     created_at timestamptz NOT NULL DEFAULT now()
//! );
//! ```
//!
//! A "collection" is the subset of rows sharing `collection`. Filters map
//! to `jsonb` containment (`doc @> filter`), and the documented natural
//! order of reads is insertion order (`created_at, id`). The table is
//! created on connect; there is no migration tooling.
//!
//! The native `uuid` identifier never leaves this module: it is rendered
//! into an opaque [`DocumentId`] on the way out.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use uuid::Uuid;

use vitrine_core::DocumentId;

use super::{Document, DocumentStore, StoreError};

/// `PostgreSQL`-backed [`DocumentStore`].
///
/// Holds the process-wide connection pool, built once at startup and shared
/// by every request handler (the pool is the concurrency-safe session the
/// contract requires). Constructed via [`PgStore::connect`], or via
/// [`PgStore::unavailable`] when no database is configured or reachable; in
/// that degraded state every operation returns [`StoreError::Unavailable`]
/// instead of crashing the process.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: Option<PgPool>,
}

impl PgStore {
    /// Connect to `PostgreSQL` and ensure the documents table exists.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or the
    /// table cannot be created. Callers that want the degraded state
    /// instead of failing fall back to [`PgStore::unavailable`].
    pub async fn connect(database_url: &secrecy::SecretString) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;

        ensure_schema(&pool).await?;

        Ok(Self { pool: Some(pool) })
    }

    /// A store with no connection; every operation returns
    /// [`StoreError::Unavailable`].
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { pool: None }
    }

    /// Whether a live pool exists.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.pool.is_some()
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool.as_ref().ok_or(StoreError::Unavailable)
    }
}

/// Create the documents table and its collection index if absent.
async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS documents (
             id         uuid PRIMARY KEY DEFAULT gen_random_uuid(),
             collection text NOT NULL,
             doc        jsonb NOT NULL,
             created_at timestamptz NOT NULL DEFAULT now()
         )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS documents_collection_idx
             ON documents (collection, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn row_to_document(row: &PgRow) -> Result<Document, sqlx::Error> {
    let id: Uuid = row.try_get("id")?;
    let Json(data): Json<Map<String, Value>> = row.try_get("doc")?;

    Ok(Document {
        id: DocumentId::new(id.to_string()),
        data,
    })
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(
        &self,
        collection: &str,
        doc: Map<String, Value>,
    ) -> Result<DocumentId, StoreError> {
        let pool = self.pool()?;

        let id: Uuid =
            sqlx::query_scalar("INSERT INTO documents (collection, doc) VALUES ($1, $2) RETURNING id")
                .bind(collection)
                .bind(Json(&doc))
                .fetch_one(pool)
                .await?;

        Ok(DocumentId::new(id.to_string()))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let pool = self.pool()?;

        // A non-positive limit never reaches SQL; Postgres rejects
        // negative LIMIT values outright.
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            "SELECT id, doc FROM documents
             WHERE collection = $1 AND doc @> $2
             ORDER BY created_at, id
             LIMIT $3",
        )
        .bind(collection)
        .bind(Json(filter))
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter()
            .map(|row| row_to_document(row).map_err(StoreError::Backend))
            .collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let pool = self.pool()?;

        let row = sqlx::query(
            "SELECT id, doc FROM documents
             WHERE collection = $1 AND doc @> $2
             ORDER BY created_at, id
             LIMIT 1",
        )
        .bind(collection)
        .bind(Json(filter))
        .fetch_optional(pool)
        .await?;

        row.as_ref().map(row_to_document).transpose().map_err(StoreError::Backend)
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let pool = self.pool()?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = PgStore::unavailable();
        assert!(!store.is_connected());

        let empty = Map::new();
        assert!(matches!(
            store.insert("product", empty.clone()).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.find("product", &empty, 20).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.find_one("product", &empty).await,
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(
            store.count("product").await,
            Err(StoreError::Unavailable)
        ));
    }
}
