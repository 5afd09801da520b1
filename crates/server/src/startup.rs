use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tracing::info;

use service::auth::{repo::seaorm::SeaOrmAuthRepository, AuthConfig};
use service::place::repo::seaorm::SeaOrmPlaceRepository;
use service::runtime;
use service::storage::FsBlobStore;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Wire the production stack: database-backed repositories and the
/// filesystem photo store under `storage.media_dir`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.media_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    // DB connection + schema
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrations_applied");

    let blobs = FsBlobStore::open(&cfg.storage.media_dir).await?;
    let state = ServerState::new(
        Arc::new(SeaOrmPlaceRepository { db: db.clone() }),
        Arc::new(blobs),
        Arc::new(SeaOrmAuthRepository { db }),
        AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours),
        cfg.storage.max_photo_bytes,
    )
    .map_err(|e| StartupError::Templates(e.to_string()))?;

    Ok(routes::build_router(state))
}

/// Load configuration from `config.toml` / environment.
pub fn load_config() -> anyhow::Result<AppConfig> {
    Ok(AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, media_dir = %cfg.storage.media_dir, "starting travel wishlist server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
