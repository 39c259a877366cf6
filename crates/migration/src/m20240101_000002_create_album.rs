//! Create `album` table.
//! Each album belongs to exactly one singer; the FK keeps that true and
//! refuses to drop a singer that still has albums.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Album::Table)
                    .if_not_exists()
                    .col(big_integer(Album::Id).auto_increment().primary_key())
                    .col(string_len(Album::Title, 255).not_null())
                    .col(big_integer(Album::SingerId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_singer")
                            .from(Album::Table, Album::SingerId)
                            .to(Singer::Table, Singer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_album_singer_id")
                    .table(Album::Table)
                    .col(Album::SingerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Album::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Album {
    Table,
    Id,
    Title,
    SingerId,
}

#[derive(DeriveIden)]
enum Singer { Table, Id }
