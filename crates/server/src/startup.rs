use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::song::metadata::HttpMetadataClient;
use service::song::repo::SeaOrmSongRepository;
use service::song::CatalogService;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to storage and apply pending migrations when configured to.
pub async fn prepare_database(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("database migrations applied");
    }
    Ok(db)
}

/// Wire repository, metadata client and service into the router.
pub fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Result<Router, StartupError> {
    let metadata = HttpMetadataClient::from_config(&cfg.metadata)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(endpoint = metadata.endpoint(), timeout_ms = cfg.metadata.timeout_ms, "metadata client ready");
    let catalog = CatalogService::new(Arc::new(SeaOrmSongRepository::new(db)), Arc::new(metadata));
    Ok(routes::build_router(ServerState::new(catalog), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr = cfg.server.bind_addr().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let db = prepare_database(&cfg).await?;
    let app = build_app(&cfg, db)?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, "song catalog listening");
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}
