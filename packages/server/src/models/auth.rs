use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::user;

/// Request body for the OAuth callback.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AuthCallbackRequest {
    /// Authorization code handed to the frontend by GitHub.
    #[schema(example = "gho_abc123")]
    pub code: String,
}

/// Public view of a user account.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub github_id: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<user::Model> for UserInfo {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            github_id: user.github_id,
            avatar_url: user.avatar_url,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// JWT bearer token valid for 30 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserInfo,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub github_id: Option<String>,
    pub avatar_url: Option<String>,
    /// Whether the account matches the configured admin email.
    pub admin: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub user: MeUser,
}

impl MeResponse {
    pub fn new(user: user::Model, admin_email: Option<&str>) -> Self {
        let admin = is_admin(&user.email, admin_email);
        Self {
            user: MeUser {
                id: user.id,
                name: user.name,
                email: user.email,
                github_id: user.github_id,
                avatar_url: user.avatar_url,
                admin,
            },
        }
    }
}

pub fn is_admin(email: &str, admin_email: Option<&str>) -> bool {
    admin_email.is_some_and(|admin| admin == email)
}
