//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bahasa_core::{CoreError, ParseError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Core(CoreError::InvalidInput(_)) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::Core(CoreError::NoAcceptableAnswer) => {
                (StatusCode::BAD_REQUEST, "no_acceptable_answer")
            }
            ApiError::Core(CoreError::InvalidConfig { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_config")
            }
            ApiError::Core(CoreError::UnknownItem(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Parse(_) => (StatusCode::UNPROCESSABLE_ENTITY, "parse_error"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
