//! DataMaker MCP server over stdio.
//!
//! # Usage
//!
//! ```bash
//! DATAMAKER_API_KEY=... datamaker-mcp
//! ```
//!
//! Or configure in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "datamaker": {
//!       "command": "datamaker-mcp",
//!       "env": { "DATAMAKER_API_KEY": "..." }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use datamaker_mcp_core::Config;
use datamaker_mcp_server::{DataMakerService, Toolbox, init_tracing};
use rmcp::ServiceExt;
use rmcp::transport::stdio;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting datamaker-mcp v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("DATAMAKER_API_KEY is not set; API calls will be unauthenticated");
    }

    let toolbox = Toolbox::from_config(&config).await?;
    let service = DataMakerService::new(toolbox).serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
