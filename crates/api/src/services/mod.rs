//! Marketplace services.
//!
//! Each service borrows the injected store handle for the duration of one
//! request; none of them holds connections or caches of its own.

pub mod authenticator;
pub mod items;
pub mod registry;

pub use authenticator::{AuthError, Authenticator};
pub use items::{ItemError, ItemRegistrar};
pub use registry::{IdentityRegistry, RegistryError};
