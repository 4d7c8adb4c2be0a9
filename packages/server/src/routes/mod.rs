use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/graphql", post(handlers::graphql::execute))
        .nest("/auth", auth_routes())
        .route(
            "/api/conversations",
            get(handlers::conversation::list_conversations),
        )
        .route("/up", get(handlers::health::up))
        .route("/health", get(handlers::health::up))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/github/callback", post(handlers::auth::github_callback))
        .route("/me", get(handlers::auth::me))
        .route("/mock/login", post(handlers::auth::mock_login))
}
