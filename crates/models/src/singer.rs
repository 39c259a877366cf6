use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::db::sync_id_sequence;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "singer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::album::Entity")]
    Album,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a singer; `id` of `None` lets the database assign one.
pub async fn create(db: &DatabaseConnection, id: Option<i64>, name: &str) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: id.map_or(NotSet, Set),
        name: Set(name.to_string()),
    };
    let txn = db.begin().await?;
    let created = am.insert(&txn).await?;
    if id.is_some() {
        sync_id_sequence(&txn, Entity.table_name()).await?;
    }
    txn.commit().await?;
    Ok(created)
}
