//! Identity registration endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use wantmarket_core::RecordId;

use crate::error::AppError;
use crate::services::IdentityRegistry;
use crate::state::AppState;

/// Request body for `POST /identities`.
///
/// Fields are optional at the type level so that absence surfaces as the
/// registry's own validation failure, not as a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub kind: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: RecordId,
}

/// Register a new identity.
///
/// POST /identities
///
/// # Errors
///
/// Returns 400 if a field is missing or empty, the kind is unknown, or the
/// username is already taken within the partition.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let registry = IdentityRegistry::new(state.store());
    let id = registry
        .register(
            req.kind.as_deref(),
            req.username.as_deref(),
            req.password.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}
