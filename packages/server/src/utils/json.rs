use serde_json::Value;

/// Decode a JSON column holding an array of strings. Non-array or non-string
/// content is dropped rather than surfaced as an error; these columns are
/// only ever written through [`to_string_list`].
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Encode a list of strings for storage in a JSON column.
pub fn to_string_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}
