//! Password digests.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Errors that can occur when parsing a [`PasswordDigest`] from storage.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DigestError {
    /// The stored value is not 64 characters long.
    #[error("digest must be exactly {expected} characters", expected = PasswordDigest::LENGTH)]
    WrongLength,
    /// The stored value contains a non-hex character.
    #[error("digest must be lowercase hex")]
    NotHex,
}

/// A fixed-length one-way digest of a plaintext secret.
///
/// The transform is SHA-256, hex-encoded: deterministic, with no salt, no
/// key, and no versioning. Two identities registered with the same password
/// therefore store identical digests; callers relying on this type get
/// exactly that contract, and the plaintext itself is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Length of the hex-encoded digest.
    pub const LENGTH: usize = 64;

    /// Compute the digest of a plaintext secret.
    #[must_use]
    pub fn compute(plaintext: &str) -> Self {
        let digest = Sha256::digest(plaintext.as_bytes());
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Parse a digest read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] if the value is not 64 lowercase hex
    /// characters.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.len() != Self::LENGTH {
            return Err(DigestError::WrongLength);
        }
        if !s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)) {
            return Err(DigestError::NotHex);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
