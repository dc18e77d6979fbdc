//! Identity kinds and usernames.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`IdentityKind`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum IdentityKindError {
    /// The input is not one of the two allowed kinds.
    #[error("kind must be either 'wanter' or 'vendor'")]
    Unknown,
}

/// The two disjoint identity partitions of the marketplace.
///
/// Every identity lives in exactly one partition, fixed at creation. A
/// wanter and a vendor may share a username; uniqueness is enforced within
/// a partition only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// A buyer-side identity.
    Wanter,
    /// A seller-side identity; only vendors may create items.
    Vendor,
}

impl IdentityKind {
    /// Parse an `IdentityKind` from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityKindError::Unknown`] for anything other than
    /// `"wanter"` or `"vendor"`.
    pub fn parse(s: &str) -> Result<Self, IdentityKindError> {
        match s {
            "wanter" => Ok(Self::Wanter),
            "vendor" => Ok(Self::Vendor),
            _ => Err(IdentityKindError::Unknown),
        }
    }

    /// Returns the wire form of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wanter => "wanter",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IdentityKind {
    type Err = IdentityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
}

/// A login name, unique within its identity partition.
///
/// The only structural constraint is non-emptiness; any other shape is
/// accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(IdentityKind::parse("wanter").unwrap(), IdentityKind::Wanter);
        assert_eq!(IdentityKind::parse("vendor").unwrap(), IdentityKind::Vendor);
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        assert!(IdentityKind::parse("admin").is_err());
        assert!(IdentityKind::parse("Vendor").is_err());
        assert!(IdentityKind::parse("vendors").is_err());
        assert!(IdentityKind::parse("").is_err());
    }

    #[test]
    fn test_kind_serde_wire_form() {
        let json = serde_json::to_string(&IdentityKind::Vendor).unwrap();
        assert_eq!(json, "\"vendor\"");

        let parsed: IdentityKind = serde_json::from_str("\"wanter\"").unwrap();
        assert_eq!(parsed, IdentityKind::Wanter);
    }

    #[test]
    fn test_username_parse() {
        let username = Username::parse("vendor123").unwrap();
        assert_eq!(username.as_str(), "vendor123");
    }

    #[test]
    fn test_username_rejects_empty() {
        assert!(matches!(Username::parse(""), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_username_display() {
        let username = Username::parse("vendor123").unwrap();
        assert_eq!(format!("{username}"), "vendor123");
    }
}
