//! AgentCore Memory browser: REST API over the control and data planes.

use membrowse_api::config::ServerConfig;
use membrowse_api::server::{self, AppState};
use membrowse_client::AgentCoreClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let client = Arc::new(AgentCoreClient::from_env().await?);

    let cache_bust = uuid::Uuid::new_v4().to_string();
    tracing::info!(cache_bust = %cache_bust, "generated cache-busting token");

    let state = Arc::new(AppState {
        control: client.clone(),
        data: client,
        cache_bust,
    });
    let app = server::router(state);
    tracing::info!("AgentCore Memory browser listening on {}", config.listen);
    axum::serve(
        tokio::net::TcpListener::bind(config.listen).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
