use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::RequireUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{AuthCallbackRequest, MeResponse, TokenResponse, UserInfo};
use crate::repo;
use crate::state::AppState;
use crate::utils::jwt;

/// Complete the GitHub OAuth flow: exchange the authorization code, fetch
/// the profile, upsert the local account, and hand back a bearer token.
#[instrument(skip(state, payload))]
pub async fn github_callback(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthCallbackRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if payload.code.trim().is_empty() {
        return Err(AppError::Validation(
            "Authorization code not provided".into(),
        ));
    }

    let access_token = state.github.exchange_code(&payload.code).await?;
    let profile = state.github.fetch_user(&access_token).await?;

    let user = repo::users::upsert_github_user(&state.db, &profile).await?;

    let token = jwt::sign(user.id, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(TokenResponse {
        token,
        user: UserInfo::from(user),
    }))
}

/// Return the current authenticated user's info.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn me(
    State(state): State<AppState>,
    user: RequireUser,
) -> Json<MeResponse> {
    Json(MeResponse::new(
        user.0,
        state.config.auth.admin_email.as_deref(),
    ))
}

/// Log in as the well-known test user without touching the OAuth provider.
/// Only answers when dev mode is on.
#[instrument(skip(state))]
pub async fn mock_login(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, AppError> {
    if !state.config.auth.dev_mode {
        return Err(AppError::Forbidden(
            "Mock login is only available in development".into(),
        ));
    }

    let user = repo::users::find_or_create_mock_user(&state.db).await?;

    let token = jwt::sign(user.id, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(TokenResponse {
        token,
        user: UserInfo::from(user),
    }))
}
