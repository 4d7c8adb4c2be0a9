use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use tracing::instrument;

use crate::extractors::auth::Identity;
use crate::graphql::AuthSession;
use crate::state::AppState;

/// Execute a GraphQL operation. Auth is resolved here and injected into the
/// request context; individual fields decide whether they require a viewer.
#[instrument(skip_all)]
pub async fn execute(
    State(state): State<AppState>,
    Identity(user): Identity,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(AuthSession { user });
    state.schema.execute(request).await.into()
}
