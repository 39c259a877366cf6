use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::domain::{Album, AlbumId, AlbumWithSinger, NewAlbum};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::{decode_body, parse_id};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/albums", tag = "albums",
    responses(
        (status = 200, description = "All albums", body = [crate::openapi::AlbumDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_albums(State(state): State<AppState>) -> Result<Json<Vec<Album>>, ApiError> {
    let albums = state.albums.list_albums().await?;
    info!(count = albums.len(), "list albums");
    Ok(Json(albums))
}

#[utoipa::path(
    get, path = "/albums/{id}", tag = "albums",
    params(("id" = i64, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Album with its singer", body = crate::openapi::AlbumWithSingerDoc),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Lookup failed, including unknown ids", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_album(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<AlbumWithSinger>, ApiError> {
    let id = AlbumId(parse_id(&raw_id)?);
    let album = state.albums.get_album_with_singer(id).await?;
    Ok(Json(album))
}

#[utoipa::path(
    post, path = "/albums", tag = "albums",
    request_body = crate::openapi::NewAlbumDoc,
    responses(
        (status = 200, description = "Stored album", body = crate::openapi::AlbumDoc),
        (status = 400, description = "Body is not an album", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store rejected the album", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_album(State(state): State<AppState>, body: Bytes) -> Result<Json<Album>, ApiError> {
    let input: NewAlbum = decode_body(&body)?;
    let created = state.albums.create_album(input).await?;
    info!(id = %created.id, singer_id = %created.singer_id, "created album");
    Ok(Json(created))
}

#[utoipa::path(
    delete, path = "/albums/{id}", tag = "albums",
    params(("id" = i64, Path, description = "Album ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Delete failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete_album(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = AlbumId(parse_id(&raw_id)?);
    state.albums.delete_album(id).await?;
    info!(%id, "deleted album");
    Ok(StatusCode::NO_CONTENT)
}
