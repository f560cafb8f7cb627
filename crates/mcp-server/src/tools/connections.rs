//! Database connection tools.

use super::{Toolbox, inline};
use crate::types::{ConnectionIdParams, CreateConnectionParams, UpdateConnectionParams};
use datamaker_mcp_core::{ConnectionId, RequestScope, Result};
use serde_json::Value;

/// `get_connections`
pub async fn get_connections(toolbox: &Toolbox, scope: &RequestScope) -> Result<String> {
    let connections = toolbox.api().connections(scope).await?;
    toolbox.shaped(&connections, "connections").await
}

/// `get_connection_by_id`
pub async fn get_connection_by_id(
    toolbox: &Toolbox,
    params: ConnectionIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = ConnectionId::parse(params.connection_id)?;
    Ok(inline(&toolbox.api().connection(&id, scope).await?))
}

/// `create_connection`
pub async fn create_connection(
    toolbox: &Toolbox,
    params: CreateConnectionParams,
    scope: &RequestScope,
) -> Result<String> {
    let body = Value::Object(params.connection);
    Ok(inline(&toolbox.api().create_connection(&body, scope).await?))
}

/// `update_connection`
pub async fn update_connection(
    toolbox: &Toolbox,
    params: UpdateConnectionParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = ConnectionId::parse(params.connection_id)?;
    let body = Value::Object(params.connection);
    Ok(inline(&toolbox.api().update_connection(&id, &body, scope).await?))
}

/// `delete_connection`
pub async fn delete_connection(
    toolbox: &Toolbox,
    params: ConnectionIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = ConnectionId::parse(params.connection_id)?;
    Ok(inline(&toolbox.api().delete_connection(&id, scope).await?))
}
