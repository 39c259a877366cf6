use axum::{
    body::Bytes,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod albums;
pub mod singers;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Parse an integer `{id}` path segment.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::bad_request(format!("invalid path param: {e}")))
}

/// Decode the first JSON value of a request body regardless of
/// `Content-Type`. Anything after that value is not read.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(ApiError::bad_request(format!("invalid body param: {e}"))),
        None => Err(ApiError::bad_request("invalid body param: EOF")),
    }
}

/// Build the full application router: album and singer resources, health
/// and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let albums = Router::new()
        .route("/albums", get(albums::list_albums).post(albums::create_album))
        .route("/albums/:id", get(albums::get_album).delete(albums::delete_album));

    let singers = Router::new()
        .route("/singers", get(singers::list_singers).post(singers::create_singer))
        .route("/singers/:id", get(singers::get_singer).delete(singers::delete_singer));

    let meta = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    meta
        .merge(albums)
        .merge(singers)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
