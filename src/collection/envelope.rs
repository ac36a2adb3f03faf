//! The `{ "items": [...] }` list envelope used by the makechat API.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::FetchError;
use crate::models::{Resource, ResourceId};

/// Unwrap the `items` array of a list response, preserving server order.
///
/// A body without `items` (or with `items: null`) is a
/// [`FetchError::MalformedResponse`]; an `items` value that is not a list of
/// the expected shape is a [`FetchError::Decode`].
pub fn parse_items<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, FetchError> {
    let Value::Object(mut map) = body else {
        return Err(FetchError::MalformedResponse("response is not a JSON object".to_string()));
    };
    match map.remove("items") {
        None | Some(Value::Null) => {
            Err(FetchError::MalformedResponse("missing `items` field".to_string()))
        }
        Some(items @ Value::Array(_)) => {
            serde_json::from_value(items).map_err(|e| FetchError::Decode(e.to_string()))
        }
        Some(other) => Err(FetchError::Decode(format!(
            "`items` must be an array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Collapse repeated ids: the first occurrence keeps its position, the last
/// occurrence supplies the attributes. Models without an id are kept as-is.
pub fn merge_by_id<T: Resource>(items: Vec<T>) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(items.len());
    let mut positions: HashMap<ResourceId, usize> = HashMap::new();

    for item in items {
        match item.id().cloned() {
            Some(id) => match positions.entry(id) {
                Entry::Occupied(slot) => merged[*slot.get()] = item,
                Entry::Vacant(slot) => {
                    slot.insert(merged.len());
                    merged.push(item);
                }
            },
            None => merged.push(item),
        }
    }
    merged
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
