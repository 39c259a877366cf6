//! Shared helpers for the album API crates: logging setup and small
//! response types that do not belong to any single layer.

pub mod types;
pub mod utils;
