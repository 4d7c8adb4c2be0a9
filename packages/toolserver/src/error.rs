use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Structured error response for tool calls.
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum ToolError {
    Validation(String),
    Unauthorized,
    NotFound(String),
    /// The backend could not be reached or answered with garbage.
    Backend(String),
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ToolError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            ToolError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "UNAUTHORIZED",
                    message: "Authentication required".into(),
                },
            ),
            ToolError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            ToolError::Backend(detail) => {
                tracing::error!("Backend error: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "BACKEND_UNAVAILABLE",
                        message: "Backend unreachable".into(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
