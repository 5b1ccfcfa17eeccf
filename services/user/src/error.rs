//! Custom error types for the user service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the user service HTTP surface
#[derive(Error, Debug)]
pub enum ApiError {
    /// No account matches the request
    #[error("{0}")]
    NotFound(String),

    /// An account already exists for the requested email
    #[error("{0}")]
    Conflict(String),

    /// The request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// The identity service could not be reached or answered with a fault
    #[error("{0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Account not found".to_string()),
            StoreError::Conflict(email) => {
                ApiError::Conflict(format!("Account already exists: {}", email))
            }
            StoreError::Validation(message) => ApiError::Validation(message),
            StoreError::Unavailable(message) => ApiError::Upstream(message),
            StoreError::Profile(_) | StoreError::Configuration(_) => ApiError::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Upstream(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
