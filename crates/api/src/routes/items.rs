//! Item creation endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use wantmarket_core::{ItemFields, RecordId};

use crate::error::AppError;
use crate::services::ItemRegistrar;
use crate::state::AppState;

/// Request body for `POST /items`.
///
/// `fields` is an open payload; a missing or non-object value collapses to
/// the empty mapping instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub vendor_id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub fields: ItemFields,
}

/// Response body for a successful item creation.
#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub id: RecordId,
}

/// Create a new catalog item for an existing vendor.
///
/// POST /items
///
/// # Errors
///
/// Returns 400 if the vendor reference is absent, malformed, or unknown,
/// or if the name is missing.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<CreateItemResponse>), AppError> {
    let registrar = ItemRegistrar::new(state.store());
    let id = registrar
        .create_item(req.vendor_id.as_deref(), req.name.as_deref(), req.fields)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateItemResponse { id })))
}
