//! Read-only MCP resources mirroring the template and connection lists.

use crate::tools::Toolbox;
use datamaker_mcp_core::RequestScope;
use datamaker_mcp_overflow::pretty_json;
use rmcp::ErrorData as McpError;
use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};
use tracing::warn;

/// URI of the template list resource.
pub const TEMPLATES_URI: &str = "datamaker://templates";

/// URI of the connection list resource.
pub const CONNECTIONS_URI: &str = "datamaker://connections";

const JSON_MIME: &str = "application/json";
const TEXT_MIME: &str = "text/plain";

/// Lists both resources.
#[must_use]
pub fn list_resources() -> Vec<Resource> {
    [
        (TEMPLATES_URI, "templates", "Get all templates"),
        (CONNECTIONS_URI, "connections", "Get all connections"),
    ]
    .into_iter()
    .map(|(uri, name, description)| {
        let mut raw = RawResource::new(uri, name);
        raw.description = Some(description.to_string());
        raw.mime_type = Some(JSON_MIME.to_string());
        raw.no_annotation()
    })
    .collect()
}

/// Reads a resource by URI.
///
/// An upstream failure is reported in the content as `Error: <message>`
/// plain text, not as a protocol error.
///
/// # Errors
///
/// Returns a resource-not-found error for an unknown URI.
pub async fn read_resource(
    toolbox: &Toolbox,
    uri: &str,
    scope: &RequestScope,
) -> Result<ReadResourceResult, McpError> {
    let outcome = match uri {
        TEMPLATES_URI => toolbox.api().templates(scope).await,
        CONNECTIONS_URI => toolbox.api().connections(scope).await,
        _ => {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {uri}"),
                None,
            ));
        }
    };

    let (mime_type, text) = match outcome {
        Ok(value) => (JSON_MIME, pretty_json(&value)),
        Err(e) => {
            warn!(uri, error = %e, "Resource read failed");
            (TEXT_MIME, format!("Error: {e}"))
        }
    };

    Ok(ReadResourceResult {
        contents: vec![text_contents(uri, mime_type, text)],
    })
}

fn text_contents(uri: &str, mime_type: &str, text: String) -> ResourceContents {
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type: slot, .. } = &mut contents {
        *slot = Some(mime_type.to_string());
    }
    contents
}
