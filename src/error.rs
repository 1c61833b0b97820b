//! Error taxonomy for request handling.
//!
//! Every handler returns `Result<T, ApiError>`. The mapping from error kind to
//! HTTP status lives in [`ErrorKind::status_code`] and nowhere else.
//! Persistence failures are logged in full but only a generic message reaches
//! the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::envelope::error_envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    MethodNotAllowed,
    Persistence,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input, rejected before the store is touched.
    #[error("{0}")]
    Validation(String),

    /// A referenced FormData or Query does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The path exists but does not accept this method.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Unexpected storage failure.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn persistence(message: impl Into<String>, source: anyhow::Error) -> Self {
        ApiError::Persistence {
            message: message.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
            ApiError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::persistence("Internal server error", e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(message) => log::warn!("rejected request: {}", message),
            ApiError::NotFound(message) => log::warn!("not found: {}", message),
            ApiError::MethodNotAllowed(message) => log::warn!("{}", message),
            ApiError::Persistence { message, source } => {
                log::error!("{}: {:#}", message, source)
            }
        }
        error_envelope(self.status_code(), self.to_string()).into_response()
    }
}
