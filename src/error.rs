use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use tracing::error;

use crate::api::response;
use crate::validation::FieldErrors;

/// Message the relay answers with whenever the backend cannot be reached.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to connect to backend";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid brief request: {0}")]
    ValidationError(FieldErrors),

    #[error("Failed to reach backend: {0}")]
    TransportError(String),

    /// Carries the best error text the backend gave us, shown to the user as is.
    #[error("{0}")]
    BackendError(String),

    #[error("Invalid response from backend: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("A brief request is already in progress")]
    SubmissionInFlight,

    #[error("Clipboard unavailable: {0}")]
    ClipboardError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::TransportError(detail) | AppError::ParseError(detail) => {
                error!(%detail, "relay could not reach backend");
                (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILURE_MESSAGE.to_string())
            }
            AppError::ValidationError(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()),
            AppError::BackendError(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ConfigError(msg) | AppError::ClipboardError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::SubmissionInFlight => (StatusCode::CONFLICT, AppError::SubmissionInFlight.to_string()),
        };

        response::error(status, message).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(FieldErrors::from(errors))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
