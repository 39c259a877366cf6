use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::album::repository::AlbumRepository;
use crate::domain::{Album, AlbumId, AlbumWithSinger, NewAlbum};
use crate::errors::ServiceError;
use crate::singer::repository::SingerRepository;

/// Album operations exposed to the HTTP layer.
#[async_trait]
pub trait AlbumService: Send + Sync {
    async fn list_albums(&self) -> Result<Vec<Album>, ServiceError>;
    async fn get_album_with_singer(&self, id: AlbumId) -> Result<AlbumWithSinger, ServiceError>;
    async fn create_album(&self, album: NewAlbum) -> Result<Album, ServiceError>;
    async fn delete_album(&self, id: AlbumId) -> Result<(), ServiceError>;
}

/// Repository-backed album service.
///
/// Every call is a single fail-fast pass through to the repositories. The
/// album/singer join is two independent reads with no transaction between
/// them.
pub struct DefaultAlbumService<A: AlbumRepository, S: SingerRepository> {
    albums: Arc<A>,
    singers: Arc<S>,
}

impl<A: AlbumRepository, S: SingerRepository> DefaultAlbumService<A, S> {
    pub fn new(albums: Arc<A>, singers: Arc<S>) -> Self { Self { albums, singers } }
}

#[async_trait]
impl<A: AlbumRepository, S: SingerRepository> AlbumService for DefaultAlbumService<A, S> {
    #[instrument(skip(self))]
    async fn list_albums(&self) -> Result<Vec<Album>, ServiceError> {
        let albums = self.albums.get_all().await?;
        debug!(count = albums.len(), "albums listed");
        Ok(albums)
    }

    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::album::{AlbumService, DefaultAlbumService};
    /// use service::domain::{NewAlbum, NewSinger};
    /// use service::singer::SingerRepository;
    /// use service::storage::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let svc = DefaultAlbumService::new(store.clone(), store.clone());
    /// let singer = tokio_test::block_on(store.add(NewSinger { id: None, name: "Ann".into() })).unwrap();
    /// let album = tokio_test::block_on(svc.create_album(NewAlbum { id: None, title: "X".into(), singer_id: singer.id })).unwrap();
    /// let view = tokio_test::block_on(svc.get_album_with_singer(album.id)).unwrap();
    /// assert_eq!(view.singer.name, "Ann");
    /// ```
    #[instrument(skip(self), fields(album_id = %id))]
    async fn get_album_with_singer(&self, id: AlbumId) -> Result<AlbumWithSinger, ServiceError> {
        let album = self
            .albums
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("album", id))?;

        let singer = self
            .singers
            .get(album.singer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("singer", album.singer_id))?;

        Ok(AlbumWithSinger::compose(album, singer))
    }

    #[instrument(skip(self, album), fields(title = %album.title, singer_id = %album.singer_id))]
    async fn create_album(&self, album: NewAlbum) -> Result<Album, ServiceError> {
        let created = self.albums.add(album).await?;
        info!(album_id = %created.id, "album_created");
        Ok(created)
    }

    #[instrument(skip(self), fields(album_id = %id))]
    async fn delete_album(&self, id: AlbumId) -> Result<(), ServiceError> {
        self.albums.delete(id).await?;
        info!("album_deleted");
        Ok(())
    }
}
