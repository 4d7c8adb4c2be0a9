use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GithubConfig;
use crate::utils::text::secret_preview;

/// Errors from the OAuth provider, split by who can fix them: a rejected
/// code or unusable profile is the caller's problem (401), a transport
/// failure is ours (500).
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub rejected the authorization code")]
    CodeRejected,
    #[error("GitHub profile response is missing the user id")]
    MissingProfile,
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Profile data fetched from the provider after a successful code exchange.
#[derive(Debug, Clone)]
pub struct GithubProfile {
    /// Provider-side user id, normalized to a string.
    pub id: String,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct ProfileBody {
    id: Option<serde_json::Value>,
    login: Option<String>,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

/// HTTP client for the GitHub OAuth code exchange and profile fetch.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    oauth_base: String,
    api_base: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            oauth_base: config.oauth_base.trim_end_matches('/').to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange an authorization code for a provider access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, GithubError> {
        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "code": code,
        });

        let response = self
            .http
            .post(format!("{}/login/oauth/access_token", self.oauth_base))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let token: TokenBody = response.json().await?;
        match token.access_token {
            Some(t) if !t.is_empty() => {
                debug!(token = %secret_preview(&t), "obtained GitHub access token");
                Ok(t)
            }
            _ => Err(GithubError::CodeRejected),
        }
    }

    /// Fetch the authenticated user's profile with a provider access token.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GithubProfile, GithubError> {
        let response = self
            .http
            .get(format!("{}/user", self.api_base))
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Accept", "application/json")
            .header("User-Agent", "hivemind-server")
            .send()
            .await?;

        let profile: ProfileBody = response.json().await?;

        // GitHub serves the id as a number; mock providers may use strings.
        let id = match profile.id {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            _ => return Err(GithubError::MissingProfile),
        };
        let login = profile.login.ok_or(GithubError::MissingProfile)?;

        Ok(GithubProfile {
            id,
            login,
            name: profile.name,
            email: profile.email,
            avatar_url: profile.avatar_url,
        })
    }
}
