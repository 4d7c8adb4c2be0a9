use axum::Json;
use serde_json::json;

/// Liveness probe. Answers as long as the process is serving requests; it
/// deliberately checks no dependencies.
pub async fn up() -> Json<serde_json::Value> {
    Json(json!({ "status": "up" }))
}
