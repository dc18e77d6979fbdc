//! Integration tests for Wantmarket.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a document store and the API server
//! cargo run -p wantmarket-api
//!
//! # Run the live suite against it
//! cargo test -p wantmarket-integration-tests -- --ignored
//! ```
//!
//! The suites in `tests/` talk to a running deployment over HTTP and are
//! ignored by default; the in-process equivalents live in the `api` crate
//! and run everywhere.

use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("WANTMARKET_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// Create an HTTP client for the live suite.
///
/// # Panics
///
/// Panics if the client cannot be constructed; in a test context that is a
/// setup failure, not a scenario outcome.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A username that will not collide with earlier runs against the same
/// persistent store.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
