use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate, then serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .context("failed to apply database migrations")?;
        info!("database migrations applied");
    }

    let app: Router = routes::build_router(ServerState::from_db(db), build_cors());

    let addr = cfg.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening; docs at /docs");
    axum::serve(listener, app).await.context("http server error")?;
    Ok(())
}
