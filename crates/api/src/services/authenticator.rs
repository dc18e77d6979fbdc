//! Credential verification across both identity partitions.

use thiserror::Error;

use wantmarket_core::PasswordDigest;

use crate::models::Identity;
use crate::models::identity::keys;
use crate::store::{Collection, DocumentStore, Filter, StoreError};

/// Errors from [`Authenticator::login`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// No identity matched the supplied pair. The message is identical
    /// whichever field was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The store could not complete a call.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Partition probe order. First match wins, so on a cross-partition
/// username collision with identical passwords the vendor identity is the
/// one logged in.
const SEARCH_ORDER: [Collection; 2] = [Collection::Vendors, Collection::Wanters];

/// Verifies a username/password pair against either identity partition.
pub struct Authenticator<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> Authenticator<'a> {
    /// Create a new authenticator over the injected store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Authenticate and return the matching identity.
    ///
    /// The stored record must match on username AND password digest; each
    /// partition is probed with a single exact-match lookup. The caller
    /// hands the identity's id back to the client as the opaque session
    /// token, with no expiry and no revocation (see DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when nothing matched, for
    /// absent fields included, and [`AuthError::Store`] if the store cannot
    /// be reached.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let digest = PasswordDigest::compute(password);
        for partition in SEARCH_ORDER {
            let filter = Filter::new()
                .field(keys::USERNAME, username)
                .field(keys::PASSWORD_DIGEST, digest.as_str());
            if let Some(stored) = self.store.find_one(partition, &filter).await? {
                let identity = Identity::from_stored(stored)?;
                tracing::debug!(%partition, id = %identity.id, "login succeeded");
                return Ok(identity);
            }
        }

        Err(AuthError::InvalidCredentials)
    }
}
