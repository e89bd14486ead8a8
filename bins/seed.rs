use anyhow::Context;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::info;

/// Fill the configured database with demo authors and books.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // the port is irrelevant here, so only the database section is validated
    let cfg = AppConfig::load()?;
    init_logging(cfg.logging.format);
    cfg.database.validate()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .context("failed to apply database migrations")?;

    let report = service::seed::run(&db).await.context("seeding failed")?;
    info!(service = "seed", event = "done", authors = report.authors, books = report.books, "database seeded");
    Ok(())
}
