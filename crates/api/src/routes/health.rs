//! Liveness probe and server time.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
}

/// Liveness probe that pings the document store.
///
/// GET /health
///
/// Returns 200 when the store answers and 500 with the failure reason when
/// it does not. Store unreachability is the only failure this endpoint
/// reports; it performs no other checks.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "success",
                message: "successfully connected to the document store".to_owned(),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    message: e.to_string(),
                }),
            )
        }
    }
}

/// Response body for `GET /time`.
#[derive(Debug, Serialize)]
pub struct TimeResponse {
    pub time: f64,
}

/// Current server time as fractional seconds since the Unix epoch.
///
/// GET /time
pub async fn time() -> Json<TimeResponse> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Json(TimeResponse {
        time: now.as_secs_f64(),
    })
}
