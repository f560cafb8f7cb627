//! Template tools: listing, lookup and data generation.

use super::{Toolbox, inline};
use crate::types::{GenerateFromFieldsParams, GenerateFromIdParams, TemplateIdParams};
use datamaker_mcp_core::{Error, RequestScope, Result, TemplateId, validate_fields};
use datamaker_mcp_overflow::normalize;
use serde_json::Value;
use tracing::debug;

/// `get_templates`
pub async fn get_templates(toolbox: &Toolbox, scope: &RequestScope) -> Result<String> {
    let templates = toolbox.api().templates(scope).await?;
    toolbox.shaped(&templates, "templates").await
}

/// `get_template_by_id`
pub async fn get_template_by_id(
    toolbox: &Toolbox,
    params: TemplateIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = TemplateId::parse(params.template_id)?;
    let template = toolbox.api().template(&id, scope).await?;
    Ok(inline(&template))
}

/// `generate_from_id`: looks the template up in the template list and
/// generates records from its fields.
pub async fn generate_from_id(
    toolbox: &Toolbox,
    params: GenerateFromIdParams,
    scope: &RequestScope,
) -> Result<String> {
    let id = TemplateId::parse(params.template_id)?;
    check_quantity(params.quantity)?;

    let templates = toolbox.api().templates(scope).await?;
    let template = find_by_id(&templates, id.as_str()).ok_or_else(|| Error::ResourceNotFound {
        resource: format!("Template with id {id}"),
    })?;
    let fields = template.get("fields").ok_or_else(|| Error::ValidationError {
        field: "template.fields".to_string(),
        reason: format!("template {id} has no fields"),
    })?;

    debug!(template = %id, quantity = params.quantity, "Generating from template");
    let data = toolbox.api().generate(fields, params.quantity, scope).await?;
    toolbox.shaped(&data, &format!("generated/{id}")).await
}

/// `generate_from_fields`: generates records from ad-hoc field definitions.
pub async fn generate_from_fields(
    toolbox: &Toolbox,
    params: GenerateFromFieldsParams,
    scope: &RequestScope,
) -> Result<String> {
    check_quantity(params.quantity)?;
    validate_fields(&params.fields)?;

    let fields = serde_json::to_value(&params.fields)
        .map_err(|e| Error::serialization("failed to encode field definitions", e))?;
    let data = toolbox.api().generate(&fields, params.quantity, scope).await?;
    toolbox.shaped(&data, "generated/custom").await
}

fn check_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(Error::ValidationError {
            field: "quantity".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Finds the record whose `id` (or `_id`) equals `id` in a list response.
fn find_by_id(list: &Value, id: &str) -> Option<Value> {
    normalize(Some(list)).into_iter().find(|item| {
        ["id", "_id"]
            .iter()
            .any(|key| item.get(*key).and_then(Value::as_str) == Some(id))
    })
}
