//! DataMaker MCP server over streamable HTTP.
//!
//! Listens on `0.0.0.0:$PORT` (default 8001). Callers authenticate each
//! request with `Authorization: Bearer <token>` and select a project with
//! `x-project-id`.

use anyhow::{Context, Result};
use datamaker_mcp_core::Config;
use datamaker_mcp_server::{DataMakerService, Toolbox, http, init_tracing};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let toolbox = Toolbox::from_config(&config).await?;
    let api = toolbox.api().clone();
    let app = http::router(DataMakerService::new(toolbox), api);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        "datamaker-mcp-http v{} listening on {addr}",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
