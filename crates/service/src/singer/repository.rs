use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{NewSinger, Singer, SingerId};
use crate::errors::ServiceError;

/// Persistence primitives for singers.
#[async_trait]
pub trait SingerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Singer>, ServiceError>;
    async fn get(&self, id: SingerId) -> Result<Option<Singer>, ServiceError>;
    async fn add(&self, singer: NewSinger) -> Result<Singer, ServiceError>;
    /// Fails while albums still reference the singer.
    async fn delete(&self, id: SingerId) -> Result<(), ServiceError>;
}

pub struct SeaOrmSingerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSingerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl SingerRepository for SeaOrmSingerRepository {
    async fn get_all(&self) -> Result<Vec<Singer>, ServiceError> {
        let rows = models::singer::Entity::find()
            .order_by_asc(models::singer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Singer::from).collect())
    }

    async fn get(&self, id: SingerId) -> Result<Option<Singer>, ServiceError> {
        let found = models::singer::Entity::find_by_id(id.0).one(&self.db).await?;
        Ok(found.map(Singer::from))
    }

    async fn add(&self, singer: NewSinger) -> Result<Singer, ServiceError> {
        let created = models::singer::create(&self.db, singer.id.map(|id| id.0), &singer.name).await?;
        Ok(created.into())
    }

    async fn delete(&self, id: SingerId) -> Result<(), ServiceError> {
        models::singer::Entity::delete_by_id(id.0).exec(&self.db).await?;
        Ok(())
    }
}
