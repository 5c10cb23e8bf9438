//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use freightcast_sdk::SdkError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Dataset or record failed validation
    Validation(Vec<String>),

    /// No model has been trained or loaded
    NotTrained,

    /// Invalid request
    InvalidRequest(String),

    /// Internal server error
    InternalError(String),

    /// Not found
    NotFound(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::NotTrained | ServerError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            ServerError::NotTrained => write!(f, "Model must be trained first"),
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = match &self {
            ServerError::Validation(errors) => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "errors": errors,
            }),
            _ => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Validation(errors) => ServerError::Validation(errors),
            SdkError::NotTrained => ServerError::NotTrained,
            other if other.is_client_error() => ServerError::InvalidRequest(other.to_string()),
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
