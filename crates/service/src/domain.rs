//! Business view of albums and singers, independent of storage.
//!
//! JSON field names follow the public API (`singerId`, camelCase).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SingerId(pub i64);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl fmt::Display for SingerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub singer_id: SingerId,
}

/// Decoded `POST /albums` body. Missing fields fall back to zero values;
/// an unknown or zero `singerId` is left for the store to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbum {
    #[serde(default)]
    pub id: Option<AlbumId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub singer_id: SingerId,
}

impl NewAlbum {
    pub fn with_id(self, id: AlbumId) -> Album {
        Album { id, title: self.title, singer_id: self.singer_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Singer {
    pub id: SingerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewSinger {
    #[serde(default)]
    pub id: Option<SingerId>,
    #[serde(default)]
    pub name: String,
}

impl NewSinger {
    pub fn with_id(self, id: SingerId) -> Singer {
        Singer { id, name: self.name }
    }
}

/// Album joined with its singer. Built on read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithSinger {
    pub id: AlbumId,
    pub title: String,
    pub singer: Singer,
}

impl AlbumWithSinger {
    pub fn compose(album: Album, singer: Singer) -> Self {
        Self { id: album.id, title: album.title, singer }
    }
}

impl From<models::album::Model> for Album {
    fn from(m: models::album::Model) -> Self {
        Album { id: AlbumId(m.id), title: m.title, singer_id: SingerId(m.singer_id) }
    }
}

impl From<models::singer::Model> for Singer {
    fn from(m: models::singer::Model) -> Self {
        Singer { id: SingerId(m.id), name: m.name }
    }
}
