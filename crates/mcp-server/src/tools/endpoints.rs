//! Endpoint tools: listing, lookup, export and fetch.

use super::{Toolbox, inline};
use crate::types::{EndpointIdParams, ExportToEndpointParams};
use datamaker_mcp_client::EndpointDefinition;
use datamaker_mcp_core::{EndpointId, RequestScope, Result};
use tracing::info;

/// `get_endpoints`
pub async fn get_endpoints(toolbox: &Toolbox, scope: &RequestScope) -> Result<String> {
    let endpoints = toolbox.api().endpoints(scope).await?;
    toolbox.shaped(&endpoints, "endpoints").await
}

/// `get_endpoint_by_id`
pub async fn get_endpoint_by_id(
    toolbox: &Toolbox,
    params: EndpointIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = EndpointId::parse(params.endpoint_id)?;
    Ok(inline(&toolbox.api().endpoint(&id, scope).await?))
}

/// `export_to_endpoint`
pub async fn export_to_endpoint(
    toolbox: &Toolbox,
    params: ExportToEndpointParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = EndpointId::parse(params.endpoint_id)?;
    let endpoint = resolve(toolbox, &id, scope).await?;

    let response = toolbox.dispatcher.send(&endpoint, &params.data).await?;
    info!(endpoint = %id, "Export completed");
    toolbox.shaped(&response, &format!("exports/{id}")).await
}

/// `fetch_from_endpoint`
pub async fn fetch_from_endpoint(
    toolbox: &Toolbox,
    params: EndpointIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = EndpointId::parse(params.endpoint_id)?;
    let endpoint = resolve(toolbox, &id, scope).await?;

    let data = toolbox.dispatcher.fetch(&endpoint).await?;
    toolbox.shaped(&data, &format!("endpoints/{id}")).await
}

async fn resolve(toolbox: &Toolbox, id: &EndpointId, scope: &RequestScope) -> Result<EndpointDefinition> {
    let record = toolbox.api().endpoint(id, scope).await?;
    EndpointDefinition::from_value(record)
}
