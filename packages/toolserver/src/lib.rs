pub mod character;
pub mod config;
pub mod error;
pub mod handlers;

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;

use crate::config::ToolConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: Client,
    pub backend_url: String,
}

impl AppState {
    pub fn new(config: &ToolConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            backend_url: config.backend.url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tools/get_character", post(handlers::get_character))
        .with_state(state)
}
