//! Character id normalization and plain-text rendering for tool output.

use serde_json::Value;
use uuid::Uuid;

const GID_PREFIX: &str = "gid://hivemind/Character/";

/// Accept a character reference as either a raw UUID or the global-id form
/// `gid://hivemind/Character/<uuid>`.
pub fn extract_character_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    let candidate = raw.strip_prefix(GID_PREFIX).unwrap_or(raw);
    Uuid::parse_str(candidate).ok()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

/// Render a character node from a GraphQL response as a plain text block.
pub fn render_character(node: &Value) -> String {
    let mut out = String::new();

    out.push_str("===== Character =====\n");
    out.push_str(&format!(
        "Name: {}\n",
        node["name"].as_str().unwrap_or("(unknown)")
    ));

    let alternate_names = string_list(&node["alternateNames"]);
    if !alternate_names.is_empty() {
        out.push_str(&format!("Also known as: {}\n", alternate_names.join(", ")));
    }

    if let Some(description) = node["description"].as_str() {
        out.push_str(&format!("Description: {description}\n"));
    }

    let tags = string_list(&node["tags"]);
    if !tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    out.push_str(&format!(
        "Public: {}\n",
        node["public"].as_bool().unwrap_or(false)
    ));

    if let Some(facts) = node["facts"].as_array()
        && !facts.is_empty()
    {
        out.push_str("Facts:\n");
        for fact in facts {
            if let Some(text) = fact["fact"].as_str() {
                out.push_str(&format!("- {text}\n"));
            }
        }
    }

    out
}
