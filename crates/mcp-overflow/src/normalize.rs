//! Coercion of arbitrary API responses into a flat list of items.
//!
//! Upstream responses come in many envelopes (`{data: [...]}`, keyed maps of
//! records, bare primitives, ...). Summarization needs an ordered sequence to
//! take a prefix from, so [`normalize`] applies the first matching rule:
//!
//! 1. `null` or absent: empty sequence
//! 2. array: unchanged
//! 3. primitive: `[{"value": <primitive>}]`
//! 4. object with a well-known collection key holding an array: that array
//! 5. object with exactly one object-valued field: rule 4 applied inside it
//! 6. object with two or more object-valued fields: those objects, in order
//! 7. object with a non-empty array field: the array, or its elements wrapped
//!    under the field name when they are not objects
//! 8. anything else: the object itself as a single item

use serde_json::{Map, Value};

/// Collection keys probed by rules 4 and 5, in priority order.
pub const COLLECTION_KEYS: [&str; 6] = ["data", "items", "results", "records", "list", "array"];

/// Normalizes a JSON value into an ordered sequence of items.
///
/// Never fails; every input yields a (possibly empty) sequence.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_overflow::normalize;
/// use serde_json::json;
///
/// let items = normalize(Some(&json!({ "data": [{ "a": 1 }, { "b": 2 }] })));
/// assert_eq!(items, vec![json!({ "a": 1 }), json!({ "b": 2 })]);
///
/// assert_eq!(normalize(Some(&json!("hello"))), vec![json!({ "value": "hello" })]);
/// assert!(normalize(None).is_empty());
/// ```
#[must_use]
pub fn normalize(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(object)) => normalize_object(object),
        Some(primitive) => vec![wrap("value", primitive.clone())],
    }
}

fn normalize_object(object: &Map<String, Value>) -> Vec<Value> {
    if let Some(items) = collection_field(object) {
        return items.clone();
    }

    let nested: Vec<&Map<String, Value>> =
        object.values().filter_map(Value::as_object).collect();

    match nested.as_slice() {
        [only] => {
            if let Some(items) = collection_field(only) {
                return items.clone();
            }
        }
        [] => {}
        many => {
            return many
                .iter()
                .map(|inner| Value::Object((*inner).clone()))
                .collect();
        }
    }

    let first_array = object.iter().find_map(|(key, value)| match value {
        Value::Array(items) if !items.is_empty() => Some((key, items)),
        _ => None,
    });

    if let Some((key, items)) = first_array {
        if items.first().is_some_and(Value::is_object) {
            return items.clone();
        }
        return items.iter().map(|item| wrap(key, item.clone())).collect();
    }

    vec![Value::Object(object.clone())]
}

fn collection_field(object: &Map<String, Value>) -> Option<&Vec<Value>> {
    COLLECTION_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
}

fn wrap(key: &str, value: Value) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(key.to_string(), value);
    Value::Object(object)
}
