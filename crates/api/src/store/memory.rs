//! In-memory document store.
//!
//! Honors the [`DocumentStore`] contract without external services; used by
//! the test suites and for local development. Like the production backend
//! it provides no atomicity across a read-then-write pair.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wantmarket_core::RecordId;

use super::{Collection, Document, DocumentStore, Filter, StoreError, StoredDocument};

type Records = HashMap<Collection, Vec<(RecordId, Document)>>;

/// A mutex-guarded map of collections to insertion-ordered records.
///
/// Cloning shares the underlying data, mirroring how a pooled client shares
/// one backing database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Records>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();
        self.lock()?.entry(collection).or_default().push((id, document));
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let records = self.lock()?;
        Ok(records.get(&collection).and_then(|documents| {
            documents
                .iter()
                .find(|(id, document)| filter.matches(*id, document))
                .map(|(id, document)| StoredDocument {
                    id: *id,
                    document: document.clone(),
                })
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
