//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use super::bands::{self, create_band, delete_band, list_bands, update_band};
use super::handlers::{self, ping, track_requests, AppState, MessageResponse};
use super::songs::{self, create_song, list_songs, update_song};
use crate::catalog::{Band, BandPatch, Song, SongPatch, SongWithBand};

/// OpenAPI document for the catalog API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ping,
        bands::list_bands,
        bands::create_band,
        bands::update_band,
        bands::delete_band,
        songs::list_songs,
        songs::create_song,
        songs::update_song,
    ),
    components(schemas(Band, BandPatch, Song, SongPatch, SongWithBand, MessageResponse))
)]
pub struct ApiDoc;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        // Bands
        .route("/bands", get(list_bands).post(create_band))
        .route("/bands/:id", put(update_band).delete(delete_band))
        // Songs
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/:id", put(update_song))
        // Docs
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route_layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
