use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::{NewSinger, Singer, SingerId};
use crate::errors::ServiceError;
use crate::singer::repository::SingerRepository;

/// Singer operations exposed to the HTTP layer.
#[async_trait]
pub trait SingerService: Send + Sync {
    async fn list_singers(&self) -> Result<Vec<Singer>, ServiceError>;
    async fn get_singer(&self, id: SingerId) -> Result<Singer, ServiceError>;
    async fn create_singer(&self, singer: NewSinger) -> Result<Singer, ServiceError>;
    async fn delete_singer(&self, id: SingerId) -> Result<(), ServiceError>;
}

pub struct DefaultSingerService<R: SingerRepository> {
    repo: Arc<R>,
}

impl<R: SingerRepository> DefaultSingerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: SingerRepository> SingerService for DefaultSingerService<R> {
    async fn list_singers(&self) -> Result<Vec<Singer>, ServiceError> {
        self.repo.get_all().await
    }

    #[instrument(skip(self), fields(singer_id = %id))]
    async fn get_singer(&self, id: SingerId) -> Result<Singer, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("singer", id))
    }

    #[instrument(skip(self, singer), fields(name = %singer.name))]
    async fn create_singer(&self, singer: NewSinger) -> Result<Singer, ServiceError> {
        let created = self.repo.add(singer).await?;
        info!(singer_id = %created.id, "singer_created");
        Ok(created)
    }

    #[instrument(skip(self), fields(singer_id = %id))]
    async fn delete_singer(&self, id: SingerId) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!("singer_deleted");
        Ok(())
    }
}
