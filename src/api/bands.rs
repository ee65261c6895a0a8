//! Band endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::handlers::{read_body, AppState, MessageResponse};
use crate::catalog::{Band, BandPatch};
use crate::error::{ApiError, ApiResult};

/// List every band.
#[utoipa::path(
    get,
    path = "/bands",
    responses(
        (status = 200, description = "All bands", body = Vec<Band>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn list_bands(State(state): State<AppState>) -> ApiResult<Json<Vec<Band>>> {
    let bands = state.db.list_bands().await?;
    Ok(Json(bands))
}

/// Create a band from `{ id, name }`.
#[utoipa::path(
    post,
    path = "/bands",
    request_body = Band,
    responses(
        (status = 200, description = "Band created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid field", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure, including duplicate id", body = String, content_type = "text/plain")
    )
)]
pub async fn create_band(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<&'static str> {
    let body = read_body(payload)?;
    let band = Band::from_body(&body)?;

    state.db.insert_band(&band).await?;
    info!(id = %band.id, "band created");

    Ok("Banda cadastrada com sucesso")
}

/// Update a band; omitted fields keep their value.
#[utoipa::path(
    put,
    path = "/bands/{id}",
    params(("id" = String, Path, description = "Id of the band to edit")),
    request_body = BandPatch,
    responses(
        (status = 200, description = "Band updated", body = MessageResponse),
        (status = 400, description = "Invalid field", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown id", body = String, content_type = "text/plain")
    )
)]
pub async fn update_band(
    State(state): State<AppState>,
    Path(id_to_edit): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let body = read_body(payload)?;
    let patch = BandPatch::from_body(&body)?;

    let updated = state
        .db
        .update_band(&id_to_edit, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("'id' não encontrada".to_string()))?;
    info!(id_to_edit = %id_to_edit, id = %updated.id, "band updated");

    Ok(MessageResponse::json("Atualização realizada com sucesso"))
}

/// Delete a band. Songs pointing at it are kept.
#[utoipa::path(
    delete,
    path = "/bands/{id}",
    params(("id" = String, Path, description = "Id of the band to delete")),
    responses(
        (status = 200, description = "Band deleted", body = MessageResponse),
        (status = 404, description = "Unknown id", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_band(
    State(state): State<AppState>,
    Path(id_to_delete): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.db.delete_band(&id_to_delete).await? {
        return Err(ApiError::NotFound("'id' não encontrado".to_string()));
    }
    info!(id = %id_to_delete, "band deleted");

    Ok(MessageResponse::json("Banda excluída com sucesso"))
}
