//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! POST /identities          - Register a wanter or vendor identity
//! POST /sessions            - Log in; the identity key is the token
//! POST /items               - Create an item for an existing vendor
//! GET  /health              - Document store liveness probe
//! GET  /time                - Server time
//! GET  /selftest            - Run the in-process scenario suite
//!
//! # Unimplemented surface (fixed 501 responses)
//! GET    /items
//! PUT    /items/{id}
//! DELETE /items/{id}
//! GET    /identities/{id}
//! PUT    /identities/{id}
//! DELETE /identities/{id}
//! ```

pub mod health;
pub mod identities;
pub mod items;
pub mod sessions;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::selftest;
use crate::state::AppState;

/// Fixed response for routes that exist on the surface but are not built
/// yet. Kept as live routes so clients probing the API observe a stable
/// shape instead of 404s that vanish when a feature lands.
async fn not_implemented() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({"error": "not implemented"})),
    )
}

/// Create the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/identities", post(identities::register))
        .route(
            "/identities/{id}",
            get(not_implemented)
                .put(not_implemented)
                .delete(not_implemented),
        )
        .route("/sessions", post(sessions::login))
        .route("/items", post(items::create).get(not_implemented))
        .route("/items/{id}", put(not_implemented).delete(not_implemented))
        .route("/health", get(health::health))
        .route("/time", get(health::time))
        .route("/selftest", get(selftest::run))
        .with_state(state)
}
