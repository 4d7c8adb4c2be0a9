use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::github::GithubError;

/// Structured error response returned by all REST endpoints on failure.
///
/// GraphQL operations never produce this shape; their failures travel in the
/// in-band `errors` list of the GraphQL response body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `FORBIDDEN`, `NOT_FOUND`, `UPSTREAM_AUTH_FAILED`,
    /// `UPSTREAM_ERROR`, `SERVICE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Authorization code not provided")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    Forbidden(String),
    NotFound(String),
    /// The OAuth provider rejected the exchange (bad code, revoked grant).
    UpstreamAuth(String),
    /// The OAuth provider misbehaved (network failure, timeout, 5xx).
    Upstream(String),
    /// The entity store cannot be reached; the request is retryable.
    ServiceUnavailable,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "FORBIDDEN",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::UpstreamAuth(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "UPSTREAM_AUTH_FAILED",
                    message: msg,
                },
            ),
            AppError::Upstream(detail) => {
                tracing::error!("Upstream provider error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "UPSTREAM_ERROR",
                        message: "Authentication failed".into(),
                    },
                )
            }
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    code: "SERVICE_UNAVAILABLE",
                    message: "Service temporarily unavailable (database)".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(detail) => {
                tracing::error!("Database connection error: {}", detail);
                AppError::ServiceUnavailable
            }
            DbErr::ConnectionAcquire(detail) => {
                tracing::error!("Database pool exhausted or unreachable: {}", detail);
                AppError::ServiceUnavailable
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<GithubError> for AppError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::CodeRejected => {
                AppError::UpstreamAuth("Failed to obtain access token".into())
            }
            GithubError::MissingProfile => {
                AppError::UpstreamAuth("Failed to get user info from GitHub".into())
            }
            GithubError::Http(e) => AppError::Upstream(e.to_string()),
        }
    }
}
