//! Wantmarket Core - Shared types library.
//!
//! This crate provides common types used across all Wantmarket components:
//! - `api` - Marketplace HTTP service
//! - `integration-tests` - Black-box tests against a running deployment
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for record ids, identity kinds, usernames,
//!   password digests, and the open item-field container

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
