use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::db::sync_id_sequence;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub singer_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::singer::Entity",
        from = "Column::SingerId",
        to = "super::singer::Column::Id"
    )]
    Singer,
}

impl Related<super::singer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Singer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert an album. No checks happen here: a dangling `singer_id` is
/// rejected by the foreign key.
pub async fn create(
    db: &DatabaseConnection,
    id: Option<i64>,
    title: &str,
    singer_id: i64,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: id.map_or(NotSet, Set),
        title: Set(title.to_string()),
        singer_id: Set(singer_id),
    };
    let txn = db.begin().await?;
    let created = am.insert(&txn).await?;
    if id.is_some() {
        sync_id_sequence(&txn, Entity.table_name()).await?;
    }
    txn.commit().await?;
    Ok(created)
}
