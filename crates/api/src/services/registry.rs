//! Identity registration.

use thiserror::Error;

use wantmarket_core::{IdentityKind, PasswordDigest, RecordId, Username};

use crate::models::Identity;
use crate::models::identity::keys;
use crate::store::{Collection, DocumentStore, Filter, StoreError};

/// Errors from [`IdentityRegistry::register`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was absent or empty.
    #[error("all fields (kind, username, password) are required")]
    MissingField,

    /// The kind is not one of the two partitions.
    #[error("kind must be either 'wanter' or 'vendor'")]
    InvalidKind,

    /// Another identity in the partition already holds the username.
    #[error("username is already taken")]
    UsernameTaken,

    /// The store could not complete a call.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates and persists new identities into the partition named by their
/// kind, enforcing username uniqueness within that partition.
pub struct IdentityRegistry<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> IdentityRegistry<'a> {
    /// Create a new registry over the injected store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Register a new identity and return its fresh id.
    ///
    /// Validation order: field presence, then kind, then username
    /// uniqueness within the target partition. Registering the same
    /// `(kind, username)` pair twice fails the second call regardless of
    /// password.
    ///
    /// The uniqueness probe and the insert are separate store calls with no
    /// spanning transaction; two concurrent registrations of the same
    /// username can both pass the probe (see DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingField`] if any input is absent or
    /// empty, [`RegistryError::InvalidKind`] for an unknown kind,
    /// [`RegistryError::UsernameTaken`] on a uniqueness conflict, and
    /// [`RegistryError::Store`] if the store cannot be reached.
    pub async fn register(
        &self,
        kind: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<RecordId, RegistryError> {
        let (Some(kind), Some(username), Some(password)) = (kind, username, password) else {
            return Err(RegistryError::MissingField);
        };
        if kind.is_empty() || password.is_empty() {
            return Err(RegistryError::MissingField);
        }
        let username = Username::parse(username).map_err(|_| RegistryError::MissingField)?;

        let kind = IdentityKind::parse(kind).map_err(|_| RegistryError::InvalidKind)?;
        let partition = Collection::from(kind);

        let taken = Filter::new().field(keys::USERNAME, username.as_str());
        if self.store.find_one(partition, &taken).await?.is_some() {
            return Err(RegistryError::UsernameTaken);
        }

        let digest = PasswordDigest::compute(password);
        let id = self
            .store
            .insert(partition, Identity::document(&username, &digest))
            .await?;

        tracing::info!(%kind, %username, %id, "identity registered");
        Ok(id)
    }
}
