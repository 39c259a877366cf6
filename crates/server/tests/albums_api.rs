use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::startup::{build_app, memory_state};
use server::state::AppState;
use service::album::AlbumService;
use service::domain::{Album, AlbumId, AlbumWithSinger, NewAlbum, NewSinger, Singer, SingerId};
use service::errors::ServiceError;
use service::singer::SingerService;

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req.body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))?;
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
    let (status, bytes) = send(app, method, uri, body).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn app_with_singer(name: &str) -> anyhow::Result<(Router, i64)> {
    let app = build_app(memory_state());
    let (status, singer) = send_json(&app, "POST", "/singers", Some(&json!({"name": name}).to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    let id = singer["id"].as_i64().expect("singer id");
    Ok((app, id))
}

#[tokio::test]
async fn empty_store_lists_no_albums() -> anyhow::Result<()> {
    let app = build_app(memory_state());
    let (status, body) = send_json(&app, "GET", "/albums", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_then_get_round_trip() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Alice").await?;
    assert_eq!(singer_id, 1);

    let (status, created) = send_json(&app, "POST", "/albums", Some(r#"{"title":"X","singerId":1}"#)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "X");
    assert_eq!(created["singerId"], 1);
    let id = created["id"].as_i64().expect("album id assigned");

    let (status, fetched) = send_json(&app, "GET", &format!("/albums/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"id": id, "title": "X", "singer": {"id": 1, "name": "Alice"}}));
    Ok(())
}

#[tokio::test]
async fn get_embeds_the_referenced_singer() -> anyhow::Result<()> {
    let (app, alice) = app_with_singer("Alice").await?;
    let (_, bob) = send_json(&app, "POST", "/singers", Some(r#"{"name":"Bob"}"#)).await?;
    let bob = bob["id"].as_i64().unwrap();

    for (title, singer) in [("A1", alice), ("B1", bob), ("A2", alice)] {
        let body = json!({"title": title, "singerId": singer}).to_string();
        let (status, _) = send_json(&app, "POST", "/albums", Some(&body)).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send_json(&app, "GET", "/albums", None).await?;
    let albums = list.as_array().expect("array");
    assert_eq!(albums.len(), 3);
    for album in albums {
        let id = album["id"].as_i64().unwrap();
        let (status, view) = send_json(&app, "GET", &format!("/albums/{id}"), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["singer"]["id"], album["singerId"]);
    }
    Ok(())
}

#[tokio::test]
async fn create_echoes_explicit_id() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Carol").await?;
    let body = json!({"id": 77, "title": "Lucky", "singerId": singer_id}).to_string();
    let (status, created) = send_json(&app, "POST", "/albums", Some(&body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({"id": 77, "title": "Lucky", "singerId": singer_id}));
    Ok(())
}

#[tokio::test]
async fn non_integer_ids_are_bad_requests() -> anyhow::Result<()> {
    let app = build_app(memory_state());
    for raw in ["abc", "1.5", "one", "12x"] {
        for method in ["GET", "DELETE"] {
            let (status, body) = send_json(&app, method, &format!("/albums/{raw}"), None).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} /albums/{raw}");
            let msg = body["message"].as_str().expect("message field");
            assert!(msg.starts_with("invalid path param: "), "{msg}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() -> anyhow::Result<()> {
    let (app, _) = app_with_singer("Dan").await?;
    for body in ["", "{", "not json", r#"{"title": 5}"#, r#"{"singerId": "one"}"#, "[1,2]", "null"] {
        let (status, resp) = send_json(&app, "POST", "/albums", Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert!(resp["message"].as_str().unwrap().starts_with("invalid body param: "));
    }
    let (_, list) = send_json(&app, "GET", "/albums", None).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn trailing_bytes_after_body_are_ignored() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Ivy").await?;
    let body = format!(r#"{{"title":"Tail","singerId":{singer_id}}} junk"#);
    let (status, created) = send_json(&app, "POST", "/albums", Some(&body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Tail");
    Ok(())
}

#[tokio::test]
async fn largest_explicit_id_gets_error_response() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Max").await?;
    let body = json!({"id": i64::MAX, "title": "Edge", "singerId": singer_id}).to_string();
    let (status, resp) = send_json(&app, "POST", "/albums", Some(&body)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp["message"].as_str().unwrap().starts_with("constraint violation: "));

    let (status, _) = send_json(&app, "POST", "/singers", Some(&json!({"id": i64::MAX, "name": "Edge"}).to_string())).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send_json(&app, "POST", "/albums", Some(&json!({"title": "Fine", "singerId": singer_id}).to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn body_is_decoded_without_content_type() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Eve").await?;
    let req = Request::builder()
        .method("POST")
        .uri("/albums")
        .body(Body::from(json!({"title": "Plain", "singerId": singer_id}).to_string()))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn delete_returns_no_content_then_get_fails() -> anyhow::Result<()> {
    let (app, singer_id) = app_with_singer("Finn").await?;
    let body = json!({"title": "Short Lived", "singerId": singer_id}).to_string();
    let (_, created) = send_json(&app, "POST", "/albums", Some(&body)).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, bytes) = send(&app, "DELETE", &format!("/albums/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    // not-found is not distinguished from storage failures: 500, not 404
    let (status, body) = send_json(&app, "GET", &format!("/albums/{id}"), None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], format!("album {id} not found"));
    Ok(())
}

#[tokio::test]
async fn album_for_unknown_singer_is_rejected_by_store() -> anyhow::Result<()> {
    let app = build_app(memory_state());
    let (status, body) = send_json(&app, "POST", "/albums", Some(r#"{"title":"Nobody's","singerId":404}"#)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("singer 404"));
    Ok(())
}

#[tokio::test]
async fn singer_endpoints_mirror_album_contract() -> anyhow::Result<()> {
    let (app, id) = app_with_singer("Gus").await?;

    let (status, singer) = send_json(&app, "GET", &format!("/singers/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(singer, json!({"id": id, "name": "Gus"}));

    let (status, _) = send_json(&app, "GET", "/singers/gus", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({"title": "Held", "singerId": id}).to_string();
    let (_, album) = send_json(&app, "POST", "/albums", Some(&body)).await?;

    // still referenced
    let (status, _) = send_json(&app, "DELETE", &format!("/singers/{id}"), None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "DELETE", &format!("/albums/{}", album["id"]), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/singers/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send_json(&app, "GET", "/singers", None).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = build_app(memory_state());
    let (status, body) = send_json(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send_json(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/albums/{id}"].is_object());
    Ok(())
}

/// Album service that counts calls and fails every one of them.
#[derive(Default)]
struct FailingAlbums {
    calls: AtomicUsize,
}

impl FailingAlbums {
    fn fail<T>(&self) -> Result<T, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServiceError::Db("connection refused".into()))
    }
}

#[async_trait]
impl AlbumService for FailingAlbums {
    async fn list_albums(&self) -> Result<Vec<Album>, ServiceError> { self.fail() }
    async fn get_album_with_singer(&self, _id: AlbumId) -> Result<AlbumWithSinger, ServiceError> { self.fail() }
    async fn create_album(&self, _album: NewAlbum) -> Result<Album, ServiceError> { self.fail() }
    async fn delete_album(&self, _id: AlbumId) -> Result<(), ServiceError> { self.fail() }
}

struct NoSingers;

#[async_trait]
impl SingerService for NoSingers {
    async fn list_singers(&self) -> Result<Vec<Singer>, ServiceError> { Ok(vec![]) }
    async fn get_singer(&self, id: SingerId) -> Result<Singer, ServiceError> { Err(ServiceError::not_found("singer", id)) }
    async fn create_singer(&self, singer: NewSinger) -> Result<Singer, ServiceError> { Ok(singer.with_id(SingerId(1))) }
    async fn delete_singer(&self, _id: SingerId) -> Result<(), ServiceError> { Ok(()) }
}

fn failing_app() -> (Router, Arc<FailingAlbums>) {
    let albums = Arc::new(FailingAlbums::default());
    let state = AppState::new(albums.clone(), Arc::new(NoSingers));
    (build_app(state), albums)
}

#[tokio::test]
async fn service_errors_map_to_internal_error_with_message() -> anyhow::Result<()> {
    let (app, albums) = failing_app();

    let cases = [
        ("GET", "/albums", None),
        ("GET", "/albums/1", None),
        ("POST", "/albums", Some(r#"{"title":"X","singerId":1}"#)),
        ("DELETE", "/albums/1", None),
    ];
    for (method, uri, body) in cases {
        let (status, resp) = send_json(&app, method, uri, body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(resp["message"], "database error: connection refused");
    }
    assert_eq!(albums.calls.load(Ordering::SeqCst), 4);
    Ok(())
}

#[tokio::test]
async fn bad_requests_never_reach_the_service() -> anyhow::Result<()> {
    let (app, albums) = failing_app();

    let (status, _) = send_json(&app, "POST", "/albums", Some("{oops")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send_json(&app, "GET", "/albums/x", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send_json(&app, "DELETE", "/albums/x", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(albums.calls.load(Ordering::SeqCst), 0);
    Ok(())
}
