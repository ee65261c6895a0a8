//! End-to-end tests for the bands and songs API.
//!
//! Each test drives the full router against a private in-memory SQLite
//! database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use bandas_api::api::{create_router, AppState};
use bandas_api::store::Database;

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_strict_refs(false).await
    }

    async fn with_strict_refs(strict: bool) -> Self {
        let db = Database::in_memory().await.expect("in-memory database");
        db.ensure_schema().await.expect("schema");
        let state = AppState::new(db).with_strict_band_refs(strict);
        Self {
            router: create_router(state),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn list(&self, uri: &str) -> Value {
        let (status, body) = self.send(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    async fn create_band(&self, id: &str, name: &str) {
        let (status, body) = self
            .send(Method::POST, "/bands", Some(json!({ "id": id, "name": name })))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    async fn create_song(&self, id: &str, name: &str, band_id: &str) -> (StatusCode, String) {
        self.send(
            Method::POST,
            "/songs",
            Some(json!({ "id": id, "name": name, "bandId": band_id })),
        )
        .await
    }
}

#[tokio::test]
async fn created_band_is_listed_once() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b1", "name": "Metallica" }])
    );
}

#[tokio::test]
async fn invalid_band_is_rejected_and_not_stored() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/bands", Some(json!({ "id": "", "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'id' deve possuir no mínimo 1 caractere");

    let (status, body) = app
        .send(Method::POST, "/bands", Some(json!({ "id": "b1" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'name' inválido, deve ser string");

    assert_eq!(app.list("/bands").await, json!([]));
}

#[tokio::test]
async fn duplicate_band_id_is_a_server_error() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    let (status, body) = app
        .send(Method::POST, "/bands", Some(json!({ "id": "b1", "name": "Other" })))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("UNIQUE"), "unexpected body: {body}");
}

#[tokio::test]
async fn updating_only_name_keeps_id_and_is_idempotent() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    for _ in 0..2 {
        let (status, body) = app
            .send(Method::PUT, "/bands/b1", Some(json!({ "name": "Megadeth" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({ "message": "Atualização realizada com sucesso" })
        );
    }

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b1", "name": "Megadeth" }])
    );
}

#[tokio::test]
async fn update_with_wrong_type_is_rejected() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    let (status, body) = app
        .send(Method::PUT, "/bands/b1", Some(json!({ "name": false })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'name' deve ser string");

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b1", "name": "Metallica" }])
    );
}

#[tokio::test]
async fn updating_missing_band_changes_nothing() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    let (status, body) = app
        .send(Method::PUT, "/bands/b2", Some(json!({ "id": "b3", "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "'id' não encontrada");

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b1", "name": "Metallica" }])
    );
}

#[tokio::test]
async fn renaming_band_id_removes_old_id() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    let (status, _) = app
        .send(
            Method::PUT,
            "/bands/b1",
            Some(json!({ "id": "b2", "name": "Megadeth" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b2", "name": "Megadeth" }])
    );
}

#[tokio::test]
async fn deleted_band_disappears_and_second_delete_is_not_found() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;
    app.create_band("b2", "Slayer").await;

    let (status, body) = app.send(Method::DELETE, "/bands/b1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "message": "Banda excluída com sucesso" })
    );

    assert_eq!(
        app.list("/bands").await,
        json!([{ "id": "b2", "name": "Slayer" }])
    );

    let (status, body) = app.send(Method::DELETE, "/bands/b1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "'id' não encontrado");
}

#[tokio::test]
async fn songs_list_is_an_inner_join() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;

    let (status, body) = app.create_song("s1", "One", "b1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Música cadastrada com sucesso");

    let (status, _) = app.create_song("s2", "Nowhere", "ghost").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.list("/songs").await,
        json!([{ "id": "s1", "name": "One", "bandId": "b1", "bandName": "Metallica" }])
    );
}

#[tokio::test]
async fn deleting_band_hides_its_songs() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;
    app.create_song("s1", "One", "b1").await;

    app.send(Method::DELETE, "/bands/b1", None).await;
    assert_eq!(app.list("/songs").await, json!([]));

    // Recreating the band makes the stored song visible again.
    app.create_band("b1", "Metallica").await;
    assert_eq!(app.list("/songs").await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn song_create_validates_every_field() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/songs", Some(json!({ "id": "s1", "name": "One" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'bandId' inválido, deve ser string");

    let (status, body) = app.create_song("s1", "One", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'bandId' deve possuir no mínimo 1 caractere");
}

#[tokio::test]
async fn song_update_merges_and_moves_between_bands() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;
    app.create_band("b2", "Slayer").await;
    app.create_song("s1", "One", "b1").await;

    let (status, _) = app
        .send(Method::PUT, "/songs/s1", Some(json!({ "bandId": "b2" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.list("/songs").await,
        json!([{ "id": "s1", "name": "One", "bandId": "b2", "bandName": "Slayer" }])
    );

    let (status, body) = app
        .send(Method::PUT, "/songs/missing", Some(json!({ "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "'id' não encontrada");
}

#[tokio::test]
async fn song_update_reports_band_id_field_by_name() {
    let app = TestApp::new().await;
    app.create_band("b1", "Metallica").await;
    app.create_song("s1", "One", "b1").await;

    let (status, body) = app
        .send(Method::PUT, "/songs/s1", Some(json!({ "bandId": 7 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "'bandId' deve ser string");
}

#[tokio::test]
async fn strict_refs_reject_unknown_band() {
    let app = TestApp::with_strict_refs(true).await;
    app.create_band("b1", "Metallica").await;

    let (status, body) = app.create_song("s1", "One", "ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "'bandId' não encontrada");

    let (status, _) = app.create_song("s1", "One", "b1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::PUT, "/songs/s1", Some(json!({ "bandId": "ghost" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.list("/songs").await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ping_has_no_side_effects() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "message": "Pong!" })
    );
    assert_eq!(app.list("/bands").await, json!([]));
}
