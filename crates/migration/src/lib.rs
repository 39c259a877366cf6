//! Migrator registering entity-specific migrations in dependency order.
//! `album` references `singer`, so singer comes first.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_singer;
mod m20240101_000002_create_album;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_singer::Migration),
            Box::new(m20240101_000002_create_album::Migration),
        ]
    }
}
