//! Document store facade.
//!
//! The marketplace persists schema-flexible JSON documents in three
//! independent collections. The core logic depends on the store for exactly
//! three operations: insert-one-returning-id, find-one-by-filter, and a
//! liveness ping. [`DocumentStore`] is that contract; a backend is
//! constructed once at startup and injected through
//! [`crate::state::AppState`], never reached through ambient globals.

pub mod memory;
pub mod postgres;

use core::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use wantmarket_core::{IdentityKind, RecordId};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// A schema-flexible record body: string keys to arbitrary JSON values.
pub type Document = Map<String, Value>;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the call failed mid-flight.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored document does not have the shape the caller expected.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The collections the marketplace writes to.
///
/// `wanters` and `vendors` are the two identity partitions; `items` holds
/// the catalog. No record exists outside these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Buyer-side identities.
    Wanters,
    /// Seller-side identities.
    Vendors,
    /// Catalog items.
    Items,
}

impl Collection {
    /// Returns the collection name used by the backing store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wanters => "wanters",
            Self::Vendors => "vendors",
            Self::Items => "items",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<IdentityKind> for Collection {
    fn from(kind: IdentityKind) -> Self {
        match kind {
            IdentityKind::Wanter => Self::Wanters,
            IdentityKind::Vendor => Self::Vendors,
        }
    }
}

/// An equality filter for [`DocumentStore::find_one`].
///
/// Matches on the record id, top-level field values, or both. An empty
/// filter matches any document in the collection.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    id: Option<RecordId>,
    fields: Document,
}

impl Filter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter matching a single record id.
    #[must_use]
    pub fn by_id(id: RecordId) -> Self {
        Self {
            id: Some(id),
            fields: Document::new(),
        }
    }

    /// Add a top-level field equality condition.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The id condition, if any.
    #[must_use]
    pub const fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// The field equality conditions.
    #[must_use]
    pub const fn fields(&self) -> &Document {
        &self.fields
    }

    /// Evaluate the filter against a single record.
    #[must_use]
    pub fn matches(&self, id: RecordId, document: &Document) -> bool {
        if self.id.is_some_and(|wanted| wanted != id) {
            return false;
        }
        self.fields
            .iter()
            .all(|(key, value)| document.get(key) == Some(value))
    }
}

/// A document returned from the store, paired with its id.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// The store-generated record id.
    pub id: RecordId,
    /// The record body.
    pub document: Document,
}

/// Contract the persistence layer must satisfy.
///
/// Ids are generated by the store at insert time and are the sole stable
/// reference to a record. `find_one` returns an arbitrary match when the
/// filter is ambiguous; callers that need determinism must filter on a
/// unique key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document and return its fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the call cannot be completed.
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<RecordId, StoreError>;

    /// Find the first document matching the filter, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the call cannot be completed,
    /// or [`StoreError::DataCorruption`] if a matched record cannot be
    /// decoded.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store does not answer.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Shared handle to a store backend.
pub type SharedStore = Arc<dyn DocumentStore>;
