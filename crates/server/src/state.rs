use std::sync::Arc;

use service::album::AlbumService;
use service::singer::SingerService;

/// Services shared by all handlers. Cloned per request; holds no request state.
#[derive(Clone)]
pub struct AppState {
    pub albums: Arc<dyn AlbumService>,
    pub singers: Arc<dyn SingerService>,
}

impl AppState {
    pub fn new(albums: Arc<dyn AlbumService>, singers: Arc<dyn SingerService>) -> Self {
        Self { albums, singers }
    }
}
