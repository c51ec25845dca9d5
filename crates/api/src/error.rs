//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::mcp::McpError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Authentication required")]
    Unauthorized,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),

    // Upstream MCP server failures
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    // Internal errors
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Authentication
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", self.to_string())
            }
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", self.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string()),

            // Validation
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),

            // Resources
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),

            // Upstream
            ApiError::Upstream { message, .. } => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone())
            }

            // Internal
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", self.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<McpError> for ApiError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            McpError::Conflict(msg) => ApiError::Conflict(msg),
            McpError::Upstream { status, message } => ApiError::Upstream { status, message },
            McpError::Http(e) => {
                tracing::error!(error = %e, "MCP server request failed");
                ApiError::Upstream {
                    status: 502,
                    message: "MCP server unreachable".to_string(),
                }
            }
        }
    }
}

impl From<crate::provider_config::ConfigFileError> for ApiError {
    fn from(err: crate::provider_config::ConfigFileError) -> Self {
        tracing::error!(error = %err, "Failed to read provider config");
        ApiError::Internal
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!(error = %err, "Token generation failed");
        ApiError::Internal
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
