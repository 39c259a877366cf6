//! Singer module: repository abstraction and pass-through service.

pub mod repository;
pub mod service;

pub use repository::{SeaOrmSingerRepository, SingerRepository};
pub use service::{DefaultSingerService, SingerService};
