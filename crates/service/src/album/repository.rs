use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{Album, AlbumId, NewAlbum};
use crate::errors::ServiceError;

/// Persistence primitives for albums.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Album>, ServiceError>;
    async fn get(&self, id: AlbumId) -> Result<Option<Album>, ServiceError>;
    /// Store the album, assigning an id when the input has none.
    async fn add(&self, album: NewAlbum) -> Result<Album, ServiceError>;
    /// Removing an id that does not exist is not an error.
    async fn delete(&self, id: AlbumId) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAlbumRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAlbumRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AlbumRepository for SeaOrmAlbumRepository {
    async fn get_all(&self) -> Result<Vec<Album>, ServiceError> {
        let rows = models::album::Entity::find()
            .order_by_asc(models::album::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Album::from).collect())
    }

    async fn get(&self, id: AlbumId) -> Result<Option<Album>, ServiceError> {
        let found = models::album::Entity::find_by_id(id.0).one(&self.db).await?;
        Ok(found.map(Album::from))
    }

    async fn add(&self, album: NewAlbum) -> Result<Album, ServiceError> {
        let created =
            models::album::create(&self.db, album.id.map(|id| id.0), &album.title, album.singer_id.0).await?;
        Ok(created.into())
    }

    async fn delete(&self, id: AlbumId) -> Result<(), ServiceError> {
        models::album::Entity::delete_by_id(id.0).exec(&self.db).await?;
        Ok(())
    }
}
