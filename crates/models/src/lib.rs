//! SeaORM entities for the album catalogue plus connection helpers.

pub mod db;
pub mod singer;
pub mod album;
