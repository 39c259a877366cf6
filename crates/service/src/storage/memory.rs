use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::album::repository::AlbumRepository;
use crate::domain::{Album, AlbumId, NewAlbum, NewSinger, Singer, SingerId};
use crate::errors::ServiceError;
use crate::singer::repository::SingerRepository;

#[derive(Default)]
struct Tables {
    singers: BTreeMap<SingerId, Singer>,
    albums: BTreeMap<AlbumId, Album>,
    next_singer_id: i64,
    next_album_id: i64,
}

impl Tables {
    fn assign_singer_id(&mut self, requested: Option<SingerId>) -> Result<SingerId, ServiceError> {
        let id = requested.unwrap_or(SingerId(self.next_singer_id.max(1)));
        let next = id.0.checked_add(1).ok_or_else(|| id_exhausted("singer", id))?;
        self.next_singer_id = self.next_singer_id.max(next);
        Ok(id)
    }

    fn assign_album_id(&mut self, requested: Option<AlbumId>) -> Result<AlbumId, ServiceError> {
        let id = requested.unwrap_or(AlbumId(self.next_album_id.max(1)));
        let next = id.0.checked_add(1).ok_or_else(|| id_exhausted("album", id))?;
        self.next_album_id = self.next_album_id.max(next);
        Ok(id)
    }
}

fn id_exhausted(entity: &str, id: impl std::fmt::Display) -> ServiceError {
    ServiceError::Constraint(format!("{entity} id {id} leaves no room for generated ids"))
}

/// In-memory store implementing both repositories over one lock, so the
/// album → singer reference can be checked the way a foreign key would.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl AlbumRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Album>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.albums.values().cloned().collect())
    }

    async fn get(&self, id: AlbumId) -> Result<Option<Album>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.albums.get(&id).cloned())
    }

    async fn add(&self, album: NewAlbum) -> Result<Album, ServiceError> {
        let mut tables = self.tables.write().await;
        if !tables.singers.contains_key(&album.singer_id) {
            return Err(ServiceError::Constraint(format!("singer {} does not exist", album.singer_id)));
        }
        if let Some(id) = album.id {
            if tables.albums.contains_key(&id) {
                return Err(ServiceError::Constraint(format!("album {} already exists", id)));
            }
        }
        let id = tables.assign_album_id(album.id)?;
        let stored = album.with_id(id);
        tables.albums.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: AlbumId) -> Result<(), ServiceError> {
        self.tables.write().await.albums.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl SingerRepository for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Singer>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.singers.values().cloned().collect())
    }

    async fn get(&self, id: SingerId) -> Result<Option<Singer>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.singers.get(&id).cloned())
    }

    async fn add(&self, singer: NewSinger) -> Result<Singer, ServiceError> {
        let mut tables = self.tables.write().await;
        if let Some(id) = singer.id {
            if tables.singers.contains_key(&id) {
                return Err(ServiceError::Constraint(format!("singer {} already exists", id)));
            }
        }
        let id = tables.assign_singer_id(singer.id)?;
        let stored = singer.with_id(id);
        tables.singers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: SingerId) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        if tables.albums.values().any(|a| a.singer_id == id) {
            return Err(ServiceError::Constraint(format!("singer {} is referenced by albums", id)));
        }
        tables.singers.remove(&id);
        Ok(())
    }
}
