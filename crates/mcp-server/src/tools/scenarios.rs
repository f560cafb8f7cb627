//! Scenario tools (server-side Python code).

use super::{Toolbox, inline};
use crate::types::{ExecuteScenarioParams, SaveScenarioParams, ScenarioIdParams};
use datamaker_mcp_client::NewScenario;
use datamaker_mcp_core::{Error, RequestScope, Result, ScenarioId};

/// `get_scenarios`
pub async fn get_scenarios(toolbox: &Toolbox, scope: &RequestScope) -> Result<String> {
    let scenarios = toolbox.api().scenarios(scope).await?;
    toolbox.shaped(&scenarios, "scenarios").await
}

/// `get_scenario_by_id`
pub async fn get_scenario_by_id(
    toolbox: &Toolbox,
    params: ScenarioIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = ScenarioId::parse(params.scenario_id)?;
    Ok(inline(&toolbox.api().scenario(&id, scope).await?))
}

/// `save_scenario`
pub async fn save_scenario(
    toolbox: &Toolbox,
    params: SaveScenarioParams,
    scope: &RequestScope,
) -> Result<String> {
    if params.name.trim().is_empty() {
        return Err(Error::ValidationError {
            field: "name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let scenario = NewScenario {
        name: params.name,
        code: params.code,
        description: params.description,
        project_id: project_or_tenant(params.project_id, scope),
    };
    Ok(inline(&toolbox.api().save_scenario(&scenario, scope).await?))
}

/// `execute_scenario`
pub async fn execute_scenario(
    toolbox: &Toolbox,
    params: ExecuteScenarioParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = ScenarioId::parse(params.scenario_id)?;
    let project_id = project_or_tenant(params.project_id, scope);

    let output = toolbox
        .api()
        .execute_scenario(&id, project_id.as_deref(), scope)
        .await?;
    toolbox.shaped(&output, &format!("scenarios/{id}")).await
}

fn project_or_tenant(project_id: Option<String>, scope: &RequestScope) -> Option<String> {
    project_id
        .filter(|p| !p.trim().is_empty())
        .or_else(|| scope.tenant().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_project_wins() {
        let scope = RequestScope::from_headers(None, Some("tenant"));
        assert_eq!(
            project_or_tenant(Some("p1".to_string()), &scope).as_deref(),
            Some("p1")
        );
    }

    #[test]
    fn test_tenant_fills_missing_project() {
        let scope = RequestScope::from_headers(None, Some("tenant"));
        assert_eq!(project_or_tenant(None, &scope).as_deref(), Some("tenant"));
        assert_eq!(
            project_or_tenant(Some(" ".to_string()), &scope).as_deref(),
            Some("tenant")
        );
        assert_eq!(project_or_tenant(None, &RequestScope::default()), None);
    }
}
