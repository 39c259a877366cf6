//! OpenAPI description of the HTTP surface, served at `/api-docs/openapi.json`.
//!
//! The `*Doc` types only describe wire shapes; handlers use the service
//! domain types.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDoc {
    pub id: i64,
    pub title: String,
    pub singer_id: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbumDoc {
    pub id: Option<i64>,
    pub title: String,
    pub singer_id: i64,
}

#[derive(Serialize, ToSchema)]
pub struct SingerDoc {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct NewSingerDoc {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct AlbumWithSingerDoc {
    pub id: i64,
    pub title: String,
    pub singer: SingerDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::albums::list_albums,
        crate::routes::albums::get_album,
        crate::routes::albums::create_album,
        crate::routes::albums::delete_album,
        crate::routes::singers::list_singers,
        crate::routes::singers::get_singer,
        crate::routes::singers::create_singer,
        crate::routes::singers::delete_singer,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            AlbumDoc,
            NewAlbumDoc,
            SingerDoc,
            NewSingerDoc,
            AlbumWithSingerDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "albums"),
        (name = "singers")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_album_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/albums", "/albums/{id}", "/singers", "/singers/{id}", "/health"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
