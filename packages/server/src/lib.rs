pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod github;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hivemind API",
        version = "1.0.0",
        description = "Character and conversation management backend. The primary \
                       surface is GraphQL at POST /graphql; the REST endpoints cover \
                       authentication and legacy clients."
    ),
    components(schemas(
        error::ErrorBody,
        models::auth::AuthCallbackRequest,
        models::auth::TokenResponse,
        models::auth::UserInfo,
        models::auth::MeResponse,
        models::auth::MeUser,
        models::conversation::ConversationListResponse,
        models::conversation::ConversationDto,
        models::conversation::PersonaDto,
        models::conversation::CharacterSummaryDto,
    )),
    tags(
        (name = "Auth", description = "GitHub OAuth login and session introspection"),
        (name = "GraphQL", description = "Characters, personas, and conversations"),
        (name = "Conversations", description = "Legacy REST conversation listing"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &config::CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    routes::app_routes()
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors)
}
