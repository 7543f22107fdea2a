#![forbid(unsafe_code)]

use std::sync::Arc;
use todo_server::{build_router, AppConfig, AppState, SqliteTodoRepository, SystemClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,axum=info")),
        )
        .init();

    let config = AppConfig::from_env();

    std::fs::create_dir_all(&config.data_dir)?;
    let database = config.data_dir.join("todo-app.db");
    info!(path = %database.display(), "opening todo store");

    let repository = Arc::new(SqliteTodoRepository::open(
        &database,
        Arc::new(SystemClock),
    )?);

    let state = AppState::new(repository, &config);
    let app = build_router(state);

    let address = config.bind_address();
    info!(%address, "starting server");

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
