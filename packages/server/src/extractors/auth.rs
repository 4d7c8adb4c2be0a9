use axum::{extract::FromRequestParts, http::request::Parts};

use crate::entity::user;
use crate::error::AppError;
use crate::repo;
use crate::seed::DEMO_USER_EMAIL;
use crate::state::AppState;
use crate::utils::jwt;

/// Literal bearer token that resolves to the seeded demo user when
/// `auth.dev_mode` is on. Ignored entirely in other environments.
pub const DEV_SENTINEL_TOKEN: &str = "FAKE_TOKEN";

/// The user resolved from the `Authorization: Bearer <token>` header, if any.
///
/// Extraction never fails on auth grounds: a missing header, a malformed or
/// expired token, and a token for a deleted user all yield `Identity(None)`.
/// Handlers serving both anonymous and signed-in traffic take this directly;
/// gated handlers take [`RequireUser`].
pub struct Identity(pub Option<user::Model>);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Ok(Identity(None));
        };

        if state.config.auth.dev_mode && token == DEV_SENTINEL_TOKEN {
            let found = repo::users::find_by_email(&state.db, DEMO_USER_EMAIL).await?;
            return Ok(Identity(found));
        }

        let Ok(claims) = jwt::verify(token, &state.config.auth.jwt_secret) else {
            return Ok(Identity(None));
        };

        let found = repo::users::find_by_id(&state.db, claims.sub).await?;
        Ok(Identity(found))
    }
}

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
pub struct RequireUser(pub user::Model);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key("Authorization") {
            return Err(AppError::TokenMissing);
        }

        let Identity(user) = Identity::from_request_parts(parts, state).await?;
        user.map(RequireUser).ok_or(AppError::TokenInvalid)
    }
}
