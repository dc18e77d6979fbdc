//! `PostgreSQL`-backed document store.
//!
//! Documents live in a single table with a JSONB body column; the
//! collection name is a plain text discriminator. Equality filters compile
//! to JSONB containment, and ids are generated by the database at insert
//! time. The schema is ensured on connect; collections carry no migration
//! history to replay.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use wantmarket_core::RecordId;

use super::{Collection, Document, DocumentStore, Filter, StoreError, StoredDocument};

/// Document store over a `PostgreSQL` connection pool.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connect to the database and ensure the backing schema exists.
    ///
    /// # Arguments
    ///
    /// * `database_url` - `PostgreSQL` connection string (wrapped in
    ///   `SecretString`)
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or the
    /// schema cannot be created.
    pub async fn connect(database_url: &SecretString) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS document (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                collection TEXT NOT NULL,
                doc JSONB NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS document_collection_idx ON document (collection)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn unavailable(error: &sqlx::Error) -> StoreError {
    StoreError::Unavailable(error.to_string())
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<RecordId, StoreError> {
        let row = sqlx::query("INSERT INTO document (collection, doc) VALUES ($1, $2) RETURNING id")
            .bind(collection.as_str())
            .bind(Value::Object(document))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        Ok(RecordId::from(id))
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query(
            "SELECT id, doc FROM document
             WHERE collection = $1
               AND ($2::uuid IS NULL OR id = $2)
               AND doc @> $3
             LIMIT 1",
        )
        .bind(collection.as_str())
        .bind(filter.id().map(|id| id.as_uuid()))
        .bind(Value::Object(filter.fields().clone()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unavailable(&e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        let doc: Value = row
            .try_get("doc")
            .map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        let Value::Object(document) = doc else {
            return Err(StoreError::DataCorruption(
                "document body is not a JSON object".to_owned(),
            ));
        };

        Ok(Some(StoredDocument {
            id: RecordId::from(id),
            document,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| unavailable(&e))
    }
}
