// College API - Web Server
// Composition root: config → logging → store → router → serve

use anyhow::{Context, Result};
use clap::Parser;

use college_api::{logging, router, AppState, CollegeService, CollegeStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = ServerConfig::parse();

    let db_path = &config.store.db_path;
    let store = CollegeStore::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let state = AppState {
        service: CollegeService::new(store),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!(addr = %config.bind, "college API listening");
    tracing::info!("API: http://{}/api/college", config.bind);
    tracing::info!("UI:  http://{}/college", config.bind);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
