//! HTTP transport: health probes plus the streamable-HTTP MCP endpoint.
//!
//! The MCP service handles every path not claimed by a probe. rmcp attaches
//! the inbound request parts to each MCP request, which is where tools read
//! the caller's credential and tenant from.

use crate::service::DataMakerService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use datamaker_mcp_client::ApiClient;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use serde_json::json;

/// Builds the HTTP application for `service`.
///
/// `api` is only used by `GET /health` to probe the DataMaker API.
pub fn router(service: DataMakerService, api: ApiClient) -> Router {
    let mcp = StreamableHttpService::new(
        move || Ok(service.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(health))
        .route("/healthcheck", get(healthcheck))
        .with_state(api)
        .fallback_service(mcp)
}

async fn health(State(api): State<ApiClient>) -> impl IntoResponse {
    if api.ping().await {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "api": "reachable" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "api": "unreachable" })),
        )
    }
}

async fn healthcheck() -> &'static str {
    "OK"
}
