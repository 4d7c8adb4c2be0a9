use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::github::GithubClient;
use crate::graphql::AppSchema;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub schema: AppSchema,
    pub github: GithubClient,
}
