//! Tool handler implementations.
//!
//! Handlers are plain async functions returning the text of a successful
//! tool response. The MCP service turns an `Err` into an `Error: <message>`
//! tool result, so nothing here deals with protocol types.

pub mod connections;
pub mod endpoints;
pub mod scenarios;
pub mod templates;
pub mod utility;

use datamaker_mcp_client::{ApiClient, EndpointDispatcher};
use datamaker_mcp_core::{Config, Result, StorageBackend};
use datamaker_mcp_overflow::{
    HeuristicTokenCounter, MemoryOverflowStore, OverflowStore, ResponseShaper, S3OverflowStore,
    Summarizer, TokenCounter, pretty_json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Backends shared by all tool handlers.
///
/// Read-only after construction; clones share connection pools and the
/// overflow store.
#[derive(Debug, Clone)]
pub struct Toolbox {
    api: ApiClient,
    dispatcher: EndpointDispatcher,
    shaper: ResponseShaper,
}

impl Toolbox {
    /// Assembles a toolbox from its parts.
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<dyn OverflowStore>, token_threshold: usize) -> Self {
        let counter: Arc<dyn TokenCounter> = Arc::new(HeuristicTokenCounter::new());
        let summarizer = Summarizer::new(store, counter.clone(), token_threshold);
        Self {
            dispatcher: EndpointDispatcher::new(api.http().clone()),
            api,
            shaper: ResponseShaper::new(counter, summarizer),
        }
    }

    /// Builds the toolbox from configuration: API client plus the overflow
    /// store selected by `storage.backend`.
    ///
    /// # Errors
    ///
    /// Returns [`datamaker_mcp_core::Error::ConfigError`] if the HTTP client
    /// cannot be built.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let store: Arc<dyn OverflowStore> = match config.storage.backend {
            StorageBackend::S3 => Arc::new(S3OverflowStore::connect(&config.storage).await),
            StorageBackend::Memory => {
                warn!("Using the in-memory overflow store; stored responses are lost on exit");
                Arc::new(MemoryOverflowStore::new(config.storage.bucket.clone()))
            }
        };
        Ok(Self::new(api, store, config.token_threshold))
    }

    /// DataMaker API client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Shapes a large result under `prefix`, or renders it inline.
    async fn shaped(&self, value: &Value, prefix: &str) -> Result<String> {
        self.shaper.shape(value, prefix).await
    }
}

/// Renders a result inline as pretty JSON.
fn inline(value: &Value) -> String {
    pretty_json(value)
}

#[cfg(test)]
pub(crate) fn test_toolbox(api_url: &str, token_threshold: usize) -> Toolbox {
    let config = Config::from_lookup(|key| {
        (key == "DATAMAKER_API_URL").then(|| api_url.to_string())
    })
    .unwrap();
    let api = ApiClient::new(&config).unwrap();
    Toolbox::new(
        api,
        Arc::new(MemoryOverflowStore::new("test-bucket")),
        token_threshold,
    )
}
