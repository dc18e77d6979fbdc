//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{AuthError, ItemError, RegistryError};
use crate::store::StoreError;

/// Application-level error type for the API.
///
/// Every store failure arrives wrapped in the service error that hit it;
/// there is no bare store variant.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity registration failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Item creation failed.
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// The store failure buried inside the service error, if any.
    fn store_failure(&self) -> Option<&StoreError> {
        match self {
            Self::Registry(RegistryError::Store(e))
            | Self::Auth(AuthError::Store(e))
            | Self::Item(ItemError::Store(e)) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store failures are server-side: capture, log, and mask internals.
        if let Some(store_error) = self.store_failure() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %store_error,
                sentry_event_id = %event_id,
                "Request failed against the store"
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "internal server error".to_owned(),
                }),
            )
                .into_response();
        }

        // Validation failures carry a client-safe reason; credential
        // failures carry the uniform message and nothing more.
        let status = match &self {
            Self::Registry(_) | Self::Item(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
