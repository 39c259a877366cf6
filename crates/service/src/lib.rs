//! Service layer for the album catalogue.
//! - `album` / `singer`: repository traits, SeaORM implementations and the
//!   services the HTTP layer calls.
//! - `storage::memory`: in-process store implementing both repositories.
//! - `domain`: storage-independent records and the album+singer projection.

pub mod errors;
pub mod domain;
pub mod album;
pub mod singer;
pub mod storage;
#[cfg(test)]
pub mod test_support;
