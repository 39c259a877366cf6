//! Create `singer` table.
//!
//! Performers referenced by albums.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Singer::Table)
                    .if_not_exists()
                    .col(big_integer(Singer::Id).auto_increment().primary_key())
                    .col(string_len(Singer::Name, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Singer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Singer { Table, Id, Name }
