//! Album module: repository abstraction and the service composing albums
//! with their singers.

pub mod repository;
pub mod service;

pub use repository::{AlbumRepository, SeaOrmAlbumRepository};
pub use service::{AlbumService, DefaultAlbumService};
