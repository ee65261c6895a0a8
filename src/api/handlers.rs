//! Shared HTTP plumbing: state, request bodies, ping and request metrics.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, MatchedPath, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::catalog::validation::{into_body, Body};
use crate::error::ApiError;
use crate::metrics;
use crate::store::Database;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog database.
    pub db: Database,
    /// Reject songs that reference a missing band.
    pub strict_band_refs: bool,
}

impl AppState {
    /// Create new app state.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            strict_band_refs: false,
        }
    }

    /// Enable or disable the band reference check for songs.
    pub fn with_strict_band_refs(mut self, strict: bool) -> Self {
        self.strict_band_refs = strict;
        self
    }
}

/// `{ "message": ... }` response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message as a JSON body.
    pub fn json(message: &'static str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Normalize an optional JSON payload into an object body.
///
/// A request without a JSON content type counts as an empty body; malformed
/// JSON is a validation failure.
pub fn read_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Body, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(into_body(value)),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Body::new()),
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}

/// Liveness check, no side effects.
#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn ping() -> impl IntoResponse {
    MessageResponse::json("Pong!")
}

/// Count and time every routed request.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    metrics::record_http_request(&method, &route, response.status().as_u16(), start);
    response
}
