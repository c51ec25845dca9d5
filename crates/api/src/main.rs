//! Graphiti Admin API server entry point

use graphiti_admin_api::{routes, AppState, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Settings::from_env()?;
    let bind_address = config.bind_address.clone();

    let state = AppState::new(config)?;
    let router = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, "Graphiti Admin API listening");

    axum::serve(listener, router).await?;

    Ok(())
}
