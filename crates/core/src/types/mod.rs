//! Core types for Wantmarket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod digest;
pub mod fields;
pub mod id;
pub mod identity;

pub use digest::{DigestError, PasswordDigest};
pub use fields::ItemFields;
pub use id::{RecordId, RecordIdError};
pub use identity::{IdentityKind, IdentityKindError, Username, UsernameError};
