//! Song endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::handlers::{read_body, AppState, MessageResponse};
use crate::catalog::{Song, SongPatch, SongWithBand};
use crate::error::{ApiError, ApiResult};

/// List songs joined with their band; orphaned songs are not listed.
#[utoipa::path(
    get,
    path = "/songs",
    responses(
        (status = 200, description = "Songs with band name", body = Vec<SongWithBand>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<Json<Vec<SongWithBand>>> {
    let songs = state.db.list_songs_with_band().await?;
    Ok(Json(songs))
}

/// Create a song from `{ id, name, bandId }`.
#[utoipa::path(
    post,
    path = "/songs",
    request_body = Song,
    responses(
        (status = 200, description = "Song created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid field", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown band, strict references only", body = String, content_type = "text/plain")
    )
)]
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<&'static str> {
    let body = read_body(payload)?;
    let song = Song::from_body(&body)?;

    check_band_ref(&state, Some(&song.band_id)).await?;
    state.db.insert_song(&song).await?;
    info!(id = %song.id, band_id = %song.band_id, "song created");

    Ok("Música cadastrada com sucesso")
}

/// Update a song; omitted fields keep their value.
#[utoipa::path(
    put,
    path = "/songs/{id}",
    params(("id" = String, Path, description = "Id of the song to edit")),
    request_body = SongPatch,
    responses(
        (status = 200, description = "Song updated", body = MessageResponse),
        (status = 400, description = "Invalid field", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown id", body = String, content_type = "text/plain")
    )
)]
pub async fn update_song(
    State(state): State<AppState>,
    Path(id_to_edit): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let body = read_body(payload)?;
    let patch = SongPatch::from_body(&body)?;

    check_band_ref(&state, patch.band_id.as_deref()).await?;
    let updated = state
        .db
        .update_song(&id_to_edit, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("'id' não encontrada".to_string()))?;
    info!(id_to_edit = %id_to_edit, id = %updated.id, "song updated");

    Ok(MessageResponse::json("Atualização realizada com sucesso"))
}

async fn check_band_ref(state: &AppState, band_id: Option<&str>) -> ApiResult<()> {
    let Some(band_id) = band_id else {
        return Ok(());
    };
    if state.strict_band_refs && !state.db.band_exists(band_id).await? {
        return Err(ApiError::NotFound("'bandId' não encontrada".to_string()));
    }
    Ok(())
}
