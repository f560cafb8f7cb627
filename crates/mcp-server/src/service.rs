//! MCP server implementation for the DataMaker API.
//!
//! `DataMakerService` registers one MCP tool per DataMaker operation, plus
//! guidance prompts and two read-only resources. Every tool:
//!
//! 1. builds a [`RequestScope`] from its own request context
//! 2. delegates to a handler in [`crate::tools`]
//! 3. renders the outcome as a single text block, with failures reported as
//!    `Error: <message>` tool results rather than protocol errors

use crate::tools::{Toolbox, connections, endpoints, scenarios, templates, utility};
use crate::types::{
    ConnectionIdParams, CreateConnectionParams, EndpointIdParams, ExecuteScenarioParams,
    ExportToEndpointParams, FlattenJsonParams, GenerateFromFieldsParams, GenerateFromIdParams,
    SaveScenarioParams, ScenarioIdParams, TemplateIdParams, UpdateConnectionParams,
};
use crate::{prompts, resources};
use axum::http::request::Parts;
use datamaker_mcp_core::{AUTHORIZATION_HEADER, RequestScope, Result as CoreResult, TENANT_HEADER};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, PaginatedRequestParam, ProtocolVersion,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, tool, tool_handler, tool_router};
use tracing::warn;

/// MCP server exposing DataMaker.
///
/// Cloned per MCP session by the HTTP transport; clones share the toolbox
/// backends.
///
/// # Examples
///
/// ```no_run
/// use datamaker_mcp_core::Config;
/// use datamaker_mcp_server::{DataMakerService, Toolbox};
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let service = DataMakerService::new(Toolbox::from_config(&config).await?);
/// service.serve(stdio()).await?.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DataMakerService {
    /// API client, endpoint dispatcher and response shaper
    toolbox: Toolbox,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl DataMakerService {
    /// Creates a new service on top of `toolbox`.
    #[must_use]
    pub fn new(toolbox: Toolbox) -> Self {
        Self {
            toolbox,
            tool_router: Self::tool_router(),
        }
    }

    /// Shared backends.
    #[must_use]
    pub const fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }
}

#[tool_router]
impl DataMakerService {
    /// List every template.
    #[tool(description = "Get all DataMaker templates")]
    async fn get_templates(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_templates",
            templates::get_templates(&self.toolbox, &scope).await,
        ))
    }

    /// Fetch one template.
    #[tool(description = "Get a DataMaker template by its id")]
    async fn get_template_by_id(
        &self,
        Parameters(params): Parameters<TemplateIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_template_by_id",
            templates::get_template_by_id(&self.toolbox, params, &scope).await,
        ))
    }

    /// Generate records from a stored template.
    #[tool(
        description = "Generate synthetic data from a DataMaker template id. Large results are stored and returned as a preview with a download URL."
    )]
    async fn generate_from_id(
        &self,
        Parameters(params): Parameters<GenerateFromIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "generate_from_id",
            templates::generate_from_id(&self.toolbox, params, &scope).await,
        ))
    }

    /// Generate records from ad-hoc field definitions.
    #[tool(
        description = "Generate synthetic data from a list of field definitions (name, type and options per field) without saving a template."
    )]
    async fn generate_from_fields(
        &self,
        Parameters(params): Parameters<GenerateFromFieldsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "generate_from_fields",
            templates::generate_from_fields(&self.toolbox, params, &scope).await,
        ))
    }

    /// List every connection.
    #[tool(description = "Get all DataMaker database connections")]
    async fn get_connections(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_connections",
            connections::get_connections(&self.toolbox, &scope).await,
        ))
    }

    /// Fetch one connection.
    #[tool(description = "Get a DataMaker database connection by its id")]
    async fn get_connection_by_id(
        &self,
        Parameters(params): Parameters<ConnectionIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_connection_by_id",
            connections::get_connection_by_id(&self.toolbox, params, &scope).await,
        ))
    }

    /// Create a connection.
    #[tool(description = "Create a new DataMaker database connection")]
    async fn create_connection(
        &self,
        Parameters(params): Parameters<CreateConnectionParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "create_connection",
            connections::create_connection(&self.toolbox, params, &scope).await,
        ))
    }

    /// Update a connection.
    #[tool(description = "Update an existing DataMaker database connection")]
    async fn update_connection(
        &self,
        Parameters(params): Parameters<UpdateConnectionParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "update_connection",
            connections::update_connection(&self.toolbox, params, &scope).await,
        ))
    }

    /// Delete a connection.
    #[tool(description = "Delete a DataMaker database connection")]
    async fn delete_connection(
        &self,
        Parameters(params): Parameters<ConnectionIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "delete_connection",
            connections::delete_connection(&self.toolbox, params, &scope).await,
        ))
    }

    /// List every endpoint.
    #[tool(description = "Get all DataMaker endpoints")]
    async fn get_endpoints(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_endpoints",
            endpoints::get_endpoints(&self.toolbox, &scope).await,
        ))
    }

    /// Fetch one endpoint.
    #[tool(description = "Get a DataMaker endpoint by its id")]
    async fn get_endpoint_by_id(
        &self,
        Parameters(params): Parameters<EndpointIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_endpoint_by_id",
            endpoints::get_endpoint_by_id(&self.toolbox, params, &scope).await,
        ))
    }

    /// Send data to an endpoint.
    #[tool(
        description = "Export data to a DataMaker endpoint. SAP endpoints are handled with a CSRF token handshake."
    )]
    async fn export_to_endpoint(
        &self,
        Parameters(params): Parameters<ExportToEndpointParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "export_to_endpoint",
            endpoints::export_to_endpoint(&self.toolbox, params, &scope).await,
        ))
    }

    /// Read data from an endpoint.
    #[tool(description = "Fetch data from a DataMaker endpoint")]
    async fn fetch_from_endpoint(
        &self,
        Parameters(params): Parameters<EndpointIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "fetch_from_endpoint",
            endpoints::fetch_from_endpoint(&self.toolbox, params, &scope).await,
        ))
    }

    /// List every scenario.
    #[tool(description = "Get all DataMaker scenarios")]
    async fn get_scenarios(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_scenarios",
            scenarios::get_scenarios(&self.toolbox, &scope).await,
        ))
    }

    /// Fetch one scenario.
    #[tool(description = "Get a DataMaker scenario by its id")]
    async fn get_scenario_by_id(
        &self,
        Parameters(params): Parameters<ScenarioIdParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "get_scenario_by_id",
            scenarios::get_scenario_by_id(&self.toolbox, params, &scope).await,
        ))
    }

    /// Save a scenario.
    #[tool(description = "Save a new DataMaker scenario containing Python code")]
    async fn save_scenario(
        &self,
        Parameters(params): Parameters<SaveScenarioParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "save_scenario",
            scenarios::save_scenario(&self.toolbox, params, &scope).await,
        ))
    }

    /// Run a scenario.
    #[tool(description = "Execute a DataMaker scenario and return its output")]
    async fn execute_scenario(
        &self,
        Parameters(params): Parameters<ExecuteScenarioParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let scope = request_scope(&context);
        Ok(render(
            "execute_scenario",
            scenarios::execute_scenario(&self.toolbox, params, &scope).await,
        ))
    }

    /// Flatten nested JSON.
    #[tool(
        description = "Flatten nested JSON into single-level objects with separator-joined keys"
    )]
    async fn flatten_json(
        &self,
        Parameters(params): Parameters<FlattenJsonParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(render("flatten_json", utility::flatten_json(&params)))
    }
}

#[tool_handler]
impl ServerHandler for DataMakerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Generate synthetic data with DataMaker. Use get_templates to find a \
                 template, then generate_from_id. Results that exceed the token budget \
                 come back as a preview with a retrievalUrl for the full data."
                    .to_string(),
            ),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(prompts::list_prompts()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        prompts::get_prompt(&request.name, request.arguments.as_ref())
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::list_resources()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let scope = request_scope(&context);
        resources::read_resource(&self.toolbox, &request.uri, &scope).await
    }
}

/// Builds the caller scope from the HTTP request parts attached to the MCP
/// request. Requests without HTTP parts (stdio) get an empty scope.
fn request_scope(context: &RequestContext<RoleServer>) -> RequestScope {
    context
        .extensions
        .get::<Parts>()
        .map_or_else(RequestScope::default, scope_from_parts)
}

fn scope_from_parts(parts: &Parts) -> RequestScope {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    };
    RequestScope::from_headers(header(AUTHORIZATION_HEADER), header(TENANT_HEADER))
}

/// Converts a handler outcome into a tool result.
pub fn render(tool: &str, outcome: CoreResult<String>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            warn!(tool, error = %e, "Tool call failed");
            CallToolResult::error(vec![Content::text(format!("Error: {e}"))])
        }
    }
}
