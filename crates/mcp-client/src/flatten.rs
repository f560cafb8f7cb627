//! Flattening of nested JSON into single-level objects.

use serde_json::{Map, Value};

/// Flattens nested objects and arrays into `separator`-joined keys.
///
/// Empty objects and arrays are kept as leaf values. A top-level array is
/// flattened element by element; primitives are returned unchanged.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_client::flatten;
/// use serde_json::json;
///
/// let flat = flatten(&json!({ "a": { "b": 1 }, "c": [1, 2] }), ".");
/// assert_eq!(flat, json!({ "a.b": 1, "c.0": 1, "c.1": 2 }));
/// ```
#[must_use]
pub fn flatten(value: &Value, separator: &str) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| flatten(item, separator)).collect()),
        Value::Object(object) => {
            let mut out = Map::new();
            for (key, child) in object {
                flatten_into(key, child, separator, &mut out);
            }
            Value::Object(out)
        }
        primitive => primitive.clone(),
    }
}

fn flatten_into(prefix: &str, value: &Value, separator: &str, out: &mut Map<String, Value>) {
    match value {
        Value::Object(object) if !object.is_empty() => {
            for (key, child) in object {
                flatten_into(&format!("{prefix}{separator}{key}"), child, separator, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}{separator}{index}"), child, separator, out);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}
