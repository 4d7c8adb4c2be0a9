use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret for signing and verifying bearer tokens.
    pub jwt_secret: String,
    /// Enables the mock login endpoint and the dev sentinel token.
    /// Must be false outside development/test.
    pub dev_mode: bool,
    /// Email granted the admin flag, if any.
    pub admin_email: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Base URL for the OAuth code exchange. Overridable so tests can point
    /// at a local mock.
    pub oauth_base: String,
    /// Base URL for the user profile API.
    pub api_base: String,
    /// Timeout for outbound provider calls, in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub github: GithubConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.dev_mode", false)?
            .set_default("github.client_id", "")?
            .set_default("github.client_secret", "")?
            .set_default("github.oauth_base", "https://github.com")?
            .set_default("github.api_base", "https://api.github.com")?
            .set_default("github.timeout_secs", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., HIVEMIND__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("HIVEMIND").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
