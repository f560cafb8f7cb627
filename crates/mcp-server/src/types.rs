//! Parameter types for the MCP tools.
//!
//! Identifiers arrive as plain strings and are validated by the tool
//! handlers, so a malformed id is reported as tool output instead of a
//! protocol error.

use datamaker_mcp_core::FieldDefinition;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Default number of records for the generate tools.
pub const DEFAULT_QUANTITY: u32 = 10;

/// Default key separator for `flatten_json`.
pub const DEFAULT_SEPARATOR: &str = ".";

const fn default_quantity() -> u32 {
    DEFAULT_QUANTITY
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

// ============================================================================
// Templates
// ============================================================================

/// Parameters identifying a template.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TemplateIdParams {
    /// A valid DataMaker template id
    pub template_id: String,
}

/// Parameters for `generate_from_id`.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_server::types::GenerateFromIdParams;
///
/// let params: GenerateFromIdParams =
///     serde_json::from_str(r#"{"template_id": "tpl-1"}"#).unwrap();
/// assert_eq!(params.quantity, 10);
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateFromIdParams {
    /// A valid DataMaker template id
    pub template_id: String,

    /// Number of records to generate
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Parameters for `generate_from_fields`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateFromFieldsParams {
    /// Field definitions describing one record
    pub fields: Vec<FieldDefinition>,

    /// Number of records to generate
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

// ============================================================================
// Connections
// ============================================================================

/// Parameters identifying a connection.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConnectionIdParams {
    /// A valid DataMaker connection id
    pub connection_id: String,
}

/// Parameters for `create_connection`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateConnectionParams {
    /// Connection settings (name, type, host, credentials, ...)
    pub connection: Map<String, Value>,
}

/// Parameters for `update_connection`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateConnectionParams {
    /// A valid DataMaker connection id
    pub connection_id: String,

    /// Connection fields to update
    pub connection: Map<String, Value>,
}

// ============================================================================
// Endpoints
// ============================================================================

/// Parameters identifying an endpoint.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EndpointIdParams {
    /// A valid DataMaker endpoint id
    pub endpoint_id: String,
}

/// Parameters for `export_to_endpoint`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExportToEndpointParams {
    /// A valid DataMaker endpoint id
    pub endpoint_id: String,

    /// Data to send to the endpoint
    pub data: Value,
}

// ============================================================================
// Scenarios
// ============================================================================

/// Parameters identifying a scenario.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScenarioIdParams {
    /// A valid DataMaker scenario id
    pub scenario_id: String,
}

/// Parameters for `save_scenario`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SaveScenarioParams {
    /// Scenario name
    pub name: String,

    /// Python code to run
    pub code: String,

    /// What the scenario does
    #[serde(default)]
    pub description: Option<String>,

    /// Project owning the scenario (defaults to the caller's project)
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Parameters for `execute_scenario`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteScenarioParams {
    /// A valid DataMaker scenario id
    pub scenario_id: String,

    /// Project to run the scenario in (defaults to the caller's project)
    #[serde(default)]
    pub project_id: Option<String>,
}

// ============================================================================
// Utilities
// ============================================================================

/// Parameters for `flatten_json`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FlattenJsonParams {
    /// JSON value to flatten
    pub data: Value,

    /// Separator placed between nested keys
    #[serde(default = "default_separator")]
    pub separator: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_from_fields_defaults() {
        let params: GenerateFromFieldsParams = serde_json::from_value(json!({
            "fields": [{ "name": "id", "type": "UUID", "options": {} }]
        }))
        .unwrap();
        assert_eq!(params.quantity, DEFAULT_QUANTITY);
        assert_eq!(params.fields.len(), 1);
    }

    #[test]
    fn test_generate_from_fields_rejects_unknown_type() {
        let result = serde_json::from_value::<GenerateFromFieldsParams>(json!({
            "fields": [{ "name": "id", "type": "Quantum" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_flatten_defaults_separator() {
        let params: FlattenJsonParams = serde_json::from_value(json!({ "data": {} })).unwrap();
        assert_eq!(params.separator, ".");
    }

    #[test]
    fn test_connection_must_be_object() {
        let result = serde_json::from_value::<CreateConnectionParams>(json!({ "connection": [1] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_scenario_optional_fields() {
        let params: SaveScenarioParams =
            serde_json::from_value(json!({ "name": "n", "code": "pass" })).unwrap();
        assert!(params.description.is_none());
        assert!(params.project_id.is_none());
    }

    #[test]
    fn test_param_schemas_generate() {
        let schema = schemars::schema_for!(GenerateFromFieldsParams);
        let value = serde_json::to_value(&schema).unwrap();
        assert!(value["properties"]["fields"].is_object());
    }
}
