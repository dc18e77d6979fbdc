//! Catalog item records.

use serde_json::Value;

use wantmarket_core::{ItemFields, RecordId};

use crate::store::{Document, StoreError, StoredDocument};

/// Document keys for item records.
pub mod keys {
    /// Display name of the item.
    pub const NAME: &str = "name";
    /// Open extension payload.
    pub const FIELDS: &str = "fields";
}

/// A catalog item.
///
/// Items are created in the context of exactly one vendor, but the record
/// deliberately does not carry the vendor id: the reference is validated at
/// creation time and then dropped (see DESIGN.md).
#[derive(Debug, Clone)]
pub struct Item {
    /// Store-generated id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Schema-less extension payload.
    pub fields: ItemFields,
}

impl Item {
    /// Build the document body for a new item.
    #[must_use]
    pub fn document(name: &str, fields: &ItemFields) -> Document {
        let mut document = Document::new();
        document.insert(keys::NAME.to_owned(), Value::String(name.to_owned()));
        document.insert(keys::FIELDS.to_owned(), Value::from(fields.clone()));
        document
    }

    /// Reconstruct an item from a stored document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` if the name is missing or not a
    /// string. A missing or malformed `fields` entry collapses to the empty
    /// mapping, like it does on the way in.
    pub fn from_stored(stored: StoredDocument) -> Result<Self, StoreError> {
        let name = stored
            .document
            .get(keys::NAME)
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::DataCorruption("item record has no name".to_owned()))?
            .to_owned();

        let fields = match stored.document.get(keys::FIELDS) {
            Some(Value::Object(map)) => ItemFields::from(map.clone()),
            _ => ItemFields::new(),
        };

        Ok(Self {
            id: stored.id,
            name,
            fields,
        })
    }
}
