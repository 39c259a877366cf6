use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::domain::{NewSinger, Singer, SingerId};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::{decode_body, parse_id};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/singers", tag = "singers",
    responses(
        (status = 200, description = "All singers", body = [crate::openapi::SingerDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_singers(State(state): State<AppState>) -> Result<Json<Vec<Singer>>, ApiError> {
    Ok(Json(state.singers.list_singers().await?))
}

#[utoipa::path(
    get, path = "/singers/{id}", tag = "singers",
    params(("id" = i64, Path, description = "Singer ID")),
    responses(
        (status = 200, description = "Singer", body = crate::openapi::SingerDoc),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Lookup failed, including unknown ids", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_singer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Singer>, ApiError> {
    let id = SingerId(parse_id(&raw_id)?);
    Ok(Json(state.singers.get_singer(id).await?))
}

#[utoipa::path(
    post, path = "/singers", tag = "singers",
    request_body = crate::openapi::NewSingerDoc,
    responses(
        (status = 200, description = "Stored singer", body = crate::openapi::SingerDoc),
        (status = 400, description = "Body is not a singer", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store rejected the singer", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_singer(State(state): State<AppState>, body: Bytes) -> Result<Json<Singer>, ApiError> {
    let input: NewSinger = decode_body(&body)?;
    let created = state.singers.create_singer(input).await?;
    info!(id = %created.id, "created singer");
    Ok(Json(created))
}

#[utoipa::path(
    delete, path = "/singers/{id}", tag = "singers",
    params(("id" = i64, Path, description = "Singer ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Delete failed, e.g. singer still has albums", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete_singer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SingerId(parse_id(&raw_id)?);
    state.singers.delete_singer(id).await?;
    info!(%id, "deleted singer");
    Ok(StatusCode::NO_CONTENT)
}
