mod handlers;
mod metrics;
mod routes;

use anyhow::Context;
use arena_common::config::JudgeConfig;
use arena_judge::ExecutionClient;
use axum::Router;
use metrics::Metrics;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub struct AppState {
    pub client: ExecutionClient,
    pub metrics: Metrics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Arena API booting...");

    let config = JudgeConfig::from_env().context("Invalid judge configuration")?;
    if !config.has_credential() {
        info!("No judge credential set (JUDGE0_API_KEY); results will be simulated");
    }

    let client = ExecutionClient::new(&config).context("Failed to create execution client")?;
    let metrics = Metrics::new().context("Failed to register metrics")?;

    let state = Arc::new(AppState { client, metrics });

    // Build router
    let app = Router::new().merge(routes::routes()).with_state(state);

    // Start server
    let addr = std::env::var("ARENA_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
