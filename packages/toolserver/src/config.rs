use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the main server; the tool forwards GraphQL there.
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToolConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

impl ToolConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("backend.url", "http://127.0.0.1:3000")?
            .set_default("backend.timeout_secs", 10)?
            .add_source(File::with_name("config/toolserver").required(false))
            // Override from environment (e.g., HIVEMIND_TOOLS__BACKEND__URL)
            .add_source(Environment::with_prefix("HIVEMIND_TOOLS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
