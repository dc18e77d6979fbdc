//! Identity records.

use serde_json::Value;

use wantmarket_core::{PasswordDigest, RecordId, Username};

use crate::store::{Document, StoreError, StoredDocument};

/// Document keys for identity records.
pub mod keys {
    /// Login name, unique within the partition.
    pub const USERNAME: &str = "username";
    /// Hex-encoded digest of the password; the plaintext is never stored.
    pub const PASSWORD_DIGEST: &str = "password_digest";
}

/// An identity as stored in one of the two partitions.
///
/// Created only by the registry; never mutated or deleted. The partition is
/// not part of the record: it is the collection the record lives in.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Store-generated id; doubles as the session token after login.
    pub id: RecordId,
    /// Login name.
    pub username: Username,
    /// One-way digest of the password.
    pub password_digest: PasswordDigest,
}

impl Identity {
    /// Build the document body for a new identity.
    #[must_use]
    pub fn document(username: &Username, digest: &PasswordDigest) -> Document {
        let mut document = Document::new();
        document.insert(
            keys::USERNAME.to_owned(),
            Value::String(username.as_str().to_owned()),
        );
        document.insert(
            keys::PASSWORD_DIGEST.to_owned(),
            Value::String(digest.as_str().to_owned()),
        );
        document
    }

    /// Reconstruct an identity from a stored document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` if a mandatory key is missing
    /// or malformed.
    pub fn from_stored(stored: StoredDocument) -> Result<Self, StoreError> {
        let username = stored
            .document
            .get(keys::USERNAME)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::DataCorruption("identity record has no username".to_owned())
            })?;
        let username = Username::parse(username)
            .map_err(|e| StoreError::DataCorruption(format!("invalid stored username: {e}")))?;

        let digest = stored
            .document
            .get(keys::PASSWORD_DIGEST)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::DataCorruption("identity record has no password digest".to_owned())
            })?;
        let password_digest = PasswordDigest::parse(digest)
            .map_err(|e| StoreError::DataCorruption(format!("invalid stored digest: {e}")))?;

        Ok(Self {
            id: stored.id,
            username,
            password_digest,
        })
    }
}
