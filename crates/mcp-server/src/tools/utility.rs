//! Local utility tools.

use super::inline;
use crate::types::FlattenJsonParams;
use datamaker_mcp_client::flatten;
use datamaker_mcp_core::{Error, Result};

/// `flatten_json`
pub fn flatten_json(params: &FlattenJsonParams) -> Result<String> {
    if params.separator.is_empty() {
        return Err(Error::ValidationError {
            field: "separator".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(inline(&flatten(&params.data, &params.separator)))
}
