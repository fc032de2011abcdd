use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use wanderly::catalog::{CatalogService, SqliteCatalogRepository};
use wanderly::config::{Cli, Config};
use wanderly::db;
use wanderly::routes;
use wanderly::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Initialize database
    let pool = db::create_pool(&config.db_path())?;
    db::run_migrations(&pool)?;
    if config.database.seed_fixtures {
        db::seed_fixtures(&pool)?;
    }

    let catalog = CatalogService::new(
        SqliteCatalogRepository::shared(pool),
        config.viewer.user_id.clone(),
        config.map.clone(),
    );
    tracing::info!("Serving catalog as viewer {}", catalog.viewer_id());

    let state = AppState::new(catalog);
    let app = routes::app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
