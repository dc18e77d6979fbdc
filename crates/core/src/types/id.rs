//! Opaque record identifiers.
//!
//! Every stored document is keyed by a [`RecordId`] generated by the store
//! at insert time. The id is the sole stable cross-reference handle; its
//! string form is the canonical wire representation.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error parsing a [`RecordId`] from its string form.
///
/// A reference check that fails to parse its input must treat the record as
/// nonexistent, not as an internal failure.
#[derive(thiserror::Error, Debug, Clone)]
#[error("malformed record id")]
pub struct RecordIdError(#[from] uuid::Error);

/// An opaque, globally unique record identifier.
///
/// Generated server-side when a document is inserted; immutable afterwards.
///
/// ## Examples
///
/// ```
/// use wantmarket_core::RecordId;
///
/// let id = RecordId::generate();
/// let parsed = RecordId::parse(&id.to_string()).unwrap();
/// assert_eq!(parsed, id);
///
/// // Anything that is not a UUID is malformed, including ids minted by
/// // other stores:
/// assert!(RecordId::parse("60a7e0b5f1b2c3d4e5f6a7b8").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh unique id.
    ///
    /// Only stores mint ids; application code receives them from insert
    /// results or parses them off the wire.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `RecordId` from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = RecordId::generate();
        let parsed = RecordId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(RecordId::parse("").is_err());
        assert!(RecordId::parse("not-an-id").is_err());
        // 24-hex ids from other document stores are not valid here
        assert!(RecordId::parse("60a7e0b5f1b2c3d4e5f6a7b8").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = RecordId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let parsed: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str() {
        let id = RecordId::generate();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
