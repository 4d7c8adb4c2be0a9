use axum::{Json, extract::State, http::HeaderMap};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::AppState;
use crate::character::{extract_character_id, render_character};
use crate::error::ToolError;

/// GraphQL operation forwarded to the backend. Public characters are
/// included so shared characters resolve for any caller.
const CHARACTERS_QUERY: &str = r#"
    query {
        characters(includePublic: true) {
            edges {
                node {
                    id name description alternateNames tags public
                    facts { fact }
                }
            }
        }
    }
"#;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "toolserver" }))
}

#[derive(Deserialize)]
pub struct GetCharacterRequest {
    /// Raw UUID or `gid://hivemind/Character/<uuid>`.
    pub id: String,
}

/// Look up one character through the backend's GraphQL API and render it as
/// a plain text block. The caller's bearer token is forwarded untouched.
#[instrument(skip(state, headers, payload))]
pub async fn get_character(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GetCharacterRequest>,
) -> Result<Json<Value>, ToolError> {
    let id = extract_character_id(&payload.id)
        .ok_or_else(|| ToolError::Validation(format!("Invalid character id: {}", payload.id)))?;

    let mut request = state
        .http
        .post(format!("{}/graphql", state.backend_url))
        .json(&json!({ "query": CHARACTERS_QUERY }));
    if let Some(authorization) = headers.get("Authorization").and_then(|v| v.to_str().ok()) {
        request = request.header("Authorization", authorization);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ToolError::Backend(e.to_string()))?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| ToolError::Backend(e.to_string()))?;

    if let Some(errors) = body["errors"].as_array()
        && !errors.is_empty()
    {
        let auth_failed = errors
            .iter()
            .any(|e| e["message"].as_str() == Some("Authentication required"));
        if auth_failed {
            return Err(ToolError::Unauthorized);
        }
        return Err(ToolError::Backend(body["errors"].to_string()));
    }

    let id = id.to_string();
    let node = body["data"]["characters"]["edges"]
        .as_array()
        .and_then(|edges| {
            edges
                .iter()
                .map(|edge| &edge["node"])
                .find(|node| node["id"].as_str() == Some(id.as_str()))
        })
        .ok_or_else(|| ToolError::NotFound(format!("Character {id} not found")))?;

    Ok(Json(json!({ "content": render_character(node) })))
}
