//! MCP server exposing the DataMaker synthetic-data API.
//!
//! The server registers one tool per DataMaker operation (templates,
//! generation, connections, endpoints, scenarios and a local JSON flattener),
//! seven guidance prompts and two read-only resources.
//!
//! # Architecture
//!
//! - [`service::DataMakerService`]: rmcp tool router and server handler
//! - [`Toolbox`]: API client, endpoint dispatcher and response shaper shared
//!   by the tool handlers
//! - [`http::router`]: axum application for the streamable-HTTP transport
//!
//! Tool results larger than the configured token budget are stored in the
//! overflow bucket and replaced by a preview with a signed retrieval URL.
//!
//! # Examples
//!
//! ```no_run
//! use datamaker_mcp_core::Config;
//! use datamaker_mcp_server::{DataMakerService, Toolbox};
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let toolbox = Toolbox::from_config(&config).await?;
//! let service = DataMakerService::new(toolbox).serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod prompts;
pub mod resources;
pub mod service;
pub(crate) mod tools;
pub mod types;

pub use service::DataMakerService;
pub use tools::Toolbox;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber used by both binaries.
///
/// `RUST_LOG` overrides the default `info,datamaker_mcp_server=debug` filter.
/// Stdout stays free for the stdio MCP transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,datamaker_mcp_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
