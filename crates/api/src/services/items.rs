//! Catalog item creation.

use thiserror::Error;

use wantmarket_core::{ItemFields, RecordId};

use crate::models::Item;
use crate::store::{Collection, DocumentStore, Filter, StoreError};

/// Errors from [`ItemRegistrar::create_item`].
#[derive(Debug, Error)]
pub enum ItemError {
    /// The vendor reference was absent, malformed, or matched no vendor.
    #[error("invalid or missing vendor_id")]
    InvalidVendor,

    /// The item name was absent or empty.
    #[error("item name is required")]
    MissingName,

    /// The store could not complete a call.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates the owning vendor and persists new catalog items.
pub struct ItemRegistrar<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ItemRegistrar<'a> {
    /// Create a new registrar over the injected store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Create an item on behalf of an existing vendor.
    ///
    /// The vendor must exist in the `vendors` partition at the moment of
    /// creation; an id that fails to parse is indistinguishable from an
    /// unknown one. The stored record carries only the name and the open
    /// fields; the validated vendor reference is not persisted (see
    /// DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidVendor`] when the vendor check fails,
    /// [`ItemError::MissingName`] for an absent or empty name, and
    /// [`ItemError::Store`] if the store cannot be reached.
    pub async fn create_item(
        &self,
        vendor_id: Option<&str>,
        name: Option<&str>,
        fields: ItemFields,
    ) -> Result<RecordId, ItemError> {
        let vendor_id = vendor_id.ok_or(ItemError::InvalidVendor)?;
        let Ok(vendor_id) = RecordId::parse(vendor_id) else {
            return Err(ItemError::InvalidVendor);
        };
        if self
            .store
            .find_one(Collection::Vendors, &Filter::by_id(vendor_id))
            .await?
            .is_none()
        {
            return Err(ItemError::InvalidVendor);
        }

        let name = name.filter(|name| !name.is_empty()).ok_or(ItemError::MissingName)?;

        let id = self
            .store
            .insert(Collection::Items, Item::document(name, &fields))
            .await?;

        tracing::info!(%id, vendor = %vendor_id, "item created");
        Ok(id)
    }
}
