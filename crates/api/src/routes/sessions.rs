//! Login endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use wantmarket_core::RecordId;

use crate::error::AppError;
use crate::services::Authenticator;
use crate::state::AppState;

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful login.
///
/// The token is the identity's record id, verbatim: a placeholder for a
/// real session scheme, with no expiry and no revocation (see DESIGN.md).
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: RecordId,
}

/// Authenticate a username/password pair against either partition.
///
/// POST /sessions
///
/// # Errors
///
/// Returns 401 with a uniform message when nothing matched; the response
/// never reveals which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let authenticator = Authenticator::new(state.store());
    let identity = authenticator
        .login(req.username.as_deref(), req.password.as_deref())
        .await?;

    Ok(Json(LoginResponse { token: identity.id }))
}
