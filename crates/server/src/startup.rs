use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{
    album::{DefaultAlbumService, SeaOrmAlbumRepository},
    singer::{DefaultSingerService, SeaOrmSingerRepository},
    storage::memory::MemoryStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire services over a fresh in-memory store.
pub fn memory_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(
        Arc::new(DefaultAlbumService::new(Arc::clone(&store), Arc::clone(&store))),
        Arc::new(DefaultSingerService::new(store)),
    )
}

/// Wire services over SeaORM repositories sharing one connection pool.
pub fn database_state(db: DatabaseConnection) -> AppState {
    let albums = Arc::new(SeaOrmAlbumRepository::new(db.clone()));
    let singers = Arc::new(SeaOrmSingerRepository::new(db));
    AppState::new(
        Arc::new(DefaultAlbumService::new(albums, Arc::clone(&singers))),
        Arc::new(DefaultSingerService::new(singers)),
    )
}

/// Build the application state for the configured storage backend. For
/// postgres this connects and applies pending migrations.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Ok(memory_state())
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            info!("database migrations applied");
            Ok(database_state(db))
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app from config and run the HTTP server until
/// Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting album api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        let state = build_state(&cfg).await.expect("memory state");
        assert!(state.albums.list_albums().await.unwrap().is_empty());
    }
}
