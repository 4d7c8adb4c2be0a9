use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::models::conversation::{ConversationDto, ConversationListResponse};
use crate::repo;
use crate::state::AppState;

/// Legacy REST listing of every conversation with relations inlined.
/// Predates the auth gate and GraphQL; kept for old clients, not extended.
#[instrument(skip(state))]
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationListResponse>, AppError> {
    let rows = repo::conversations::list_all(&state.db).await?;
    let bundles = repo::conversations::load_relations(&state.db, rows).await?;

    Ok(Json(ConversationListResponse {
        conversations: bundles.into_iter().map(ConversationDto::from).collect(),
    }))
}
