//! Guidance prompts.
//!
//! Each prompt expands into a single user message walking the client through
//! the tools of one workflow. Arguments are optional and only change the
//! wording.

use rmcp::ErrorData as McpError;
use rmcp::model::{
    GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
};
use serde_json::Value;

struct PromptEntry {
    name: &'static str,
    description: &'static str,
    /// `(name, description)` pairs; all optional.
    arguments: &'static [(&'static str, &'static str)],
}

const CATALOG: &[PromptEntry] = &[
    PromptEntry {
        name: "generate-synthetic-data",
        description: "Guide for generating synthetic data using DataMaker templates",
        arguments: &[
            ("template_name", "Optional name of the template to use"),
            ("quantity", "Optional number of records to generate"),
        ],
    },
    PromptEntry {
        name: "export-data-workflow",
        description: "Guide for exporting generated data to a DataMaker endpoint",
        arguments: &[("endpoint_name", "Optional name of the endpoint to export to")],
    },
    PromptEntry {
        name: "template-management",
        description: "Guide for understanding and managing DataMaker templates",
        arguments: &[],
    },
    PromptEntry {
        name: "connection-management",
        description: "Guide for managing DataMaker database connections",
        arguments: &[],
    },
    PromptEntry {
        name: "endpoint-data-workflow",
        description: "Guide for fetching and working with data from endpoints",
        arguments: &[("endpoint_name", "Optional name of the endpoint to fetch from")],
    },
    PromptEntry {
        name: "scenario-workflow",
        description: "Guide for working with DataMaker scenarios (Python code execution)",
        arguments: &[("scenario_name", "Optional name of the scenario")],
    },
    PromptEntry {
        name: "getting-started",
        description: "Complete guide for getting started with DataMaker MCP server",
        arguments: &[],
    },
];

/// Lists every prompt with its arguments.
#[must_use]
pub fn list_prompts() -> Vec<Prompt> {
    CATALOG.iter().map(describe).collect()
}

fn describe(entry: &PromptEntry) -> Prompt {
    let arguments = entry
        .arguments
        .iter()
        .map(|(name, description)| PromptArgument {
            name: (*name).to_string(),
            title: None,
            description: Some((*description).to_string()),
            required: Some(false),
        })
        .collect();

    Prompt::new(entry.name, Some(entry.description), Some(arguments))
}

/// Renders the prompt `name` with the given arguments.
///
/// # Errors
///
/// Returns an invalid-params error for an unknown prompt name.
pub fn get_prompt(name: &str, arguments: Option<&JsonObject>) -> Result<GetPromptResult, McpError> {
    let entry = CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| McpError::invalid_params(format!("Unknown prompt: {name}"), None))?;

    let arg = |key: &str| argument(arguments, key);
    let text = match entry.name {
        "generate-synthetic-data" => generate_synthetic_data(
            arg("template_name").as_deref(),
            arg("quantity").as_deref(),
        ),
        "export-data-workflow" => export_data_workflow(arg("endpoint_name").as_deref()),
        "template-management" => TEMPLATE_MANAGEMENT.to_string(),
        "connection-management" => CONNECTION_MANAGEMENT.to_string(),
        "endpoint-data-workflow" => endpoint_data_workflow(arg("endpoint_name").as_deref()),
        "scenario-workflow" => scenario_workflow(arg("scenario_name").as_deref()),
        _ => GETTING_STARTED.to_string(),
    };

    Ok(GetPromptResult {
        description: Some(entry.description.to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}

/// Non-blank argument value; numbers are accepted for numeric arguments.
fn argument(arguments: Option<&JsonObject>, key: &str) -> Option<String> {
    match arguments?.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn quoted_or(name: Option<&str>, fallback: &str) -> String {
    name.map_or_else(|| fallback.to_string(), |n| format!("\"{n}\""))
}

fn generate_synthetic_data(template_name: Option<&str>, quantity: Option<&str>) -> String {
    let quantity = quantity.unwrap_or("10");
    let template = template_name
        .map_or_else(|| "a template".to_string(), |n| format!("the \"{n}\" template"));
    let target = quoted_or(template_name, "the template I want to use");

    format!(
        "I need to generate {quantity} records of synthetic data using {template}. Can you help me:

1. First, list all available templates using the get_templates tool
2. Find the template ID for {target}
3. Generate the data using the generate_from_id tool with the template ID and quantity of {quantity}

Please execute these steps and show me the generated data."
    )
}

fn export_data_workflow(endpoint_name: Option<&str>) -> String {
    let endpoint = endpoint_phrase(endpoint_name);
    let target = quoted_or(endpoint_name, "the endpoint I want");

    format!(
        "I need to export data to {endpoint}. Can you help me:

1. List all available endpoints using the get_endpoints tool
2. Find the endpoint ID for {target}
3. Guide me through using the export_to_endpoint tool with the correct endpoint ID and data format

Please walk me through these steps."
    )
}

fn endpoint_data_workflow(endpoint_name: Option<&str>) -> String {
    let endpoint = endpoint_phrase(endpoint_name);
    let target = quoted_or(endpoint_name, "the endpoint I want");

    format!(
        "I want to fetch and work with data from {endpoint}. Can you help me:

1. List all available endpoints using the get_endpoints tool
2. Find the endpoint ID for {target}
3. Fetch data from the endpoint using the fetch_from_endpoint tool
4. If the data is in a nested format, show me how to use the flatten_json tool to make it easier to work with

Please guide me through fetching and processing endpoint data."
    )
}

fn endpoint_phrase(endpoint_name: Option<&str>) -> String {
    endpoint_name.map_or_else(|| "an endpoint".to_string(), |n| format!("the \"{n}\" endpoint"))
}

fn scenario_workflow(scenario_name: Option<&str>) -> String {
    let scenario = quoted_or(scenario_name, "a scenario");
    let find = scenario_name.map_or_else(
        || "Show me how to find a scenario by ID".to_string(),
        |n| format!("Find the scenario ID for \"{n}\""),
    );

    format!(
        "I want to work with DataMaker scenarios. Can you help me with {scenario}:

1. List all available scenarios using the get_scenarios tool
2. {find}
3. Explain how to save a new scenario using the save_scenario tool with Python code
4. Show me how to execute a scenario using the execute_scenario tool with the scenario ID and project ID

Scenarios allow you to run custom Python code for advanced data generation and transformation workflows."
    )
}

const TEMPLATE_MANAGEMENT: &str = "I want to understand and work with DataMaker templates. Can you help me:

1. Show me all available templates using the get_templates tool
2. Explain what templates are and how they work
3. Show me how to view detailed information about a specific template using get_template_by_id
4. Explain the different field types available in DataMaker templates (like Words, UUID, Number, Name, Email, etc.)

Please provide a comprehensive overview of template management.";

const CONNECTION_MANAGEMENT: &str = "I want to manage database connections in DataMaker. Can you help me:

1. List all available connections using the get_connections tool
2. Explain how to view details of a specific connection using get_connection_by_id
3. Show me how to create a new connection using the create_connection tool
4. Explain how to update an existing connection using the update_connection tool
5. Explain how to delete a connection using the delete_connection tool

Please provide a comprehensive guide for connection management.";

const GETTING_STARTED: &str = "I'm new to DataMaker and want to get started. Can you provide a comprehensive introduction that covers:

1. **What is DataMaker?** - Explain the purpose and capabilities
2. **Available Tools** - Overview of all the tools I can use:
   - Template management (get_templates, get_template_by_id, generate_from_id, generate_from_fields)
   - Connection management (get_connections, create_connection, update_connection, delete_connection)
   - Endpoint management (get_endpoints, get_endpoint_by_id, export_to_endpoint, fetch_from_endpoint)
   - Scenario management (get_scenarios, get_scenario_by_id, save_scenario, execute_scenario)
   - Utility tools (flatten_json)
3. **Common Workflows** - Show me typical use cases:
   - Generating synthetic data from a template
   - Exporting generated data to an endpoint
   - Fetching data from external sources
   - Working with scenarios for advanced data generation
4. **Best Practices** - Tips for effective use

Please provide a beginner-friendly introduction to DataMaker.";
