//! Error handling module for the timetable backend.
//!
//! Provides the domain error type with mapping to HTTP status codes and plain-text responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Usage hint returned when a lessons query carries no selectors.
pub const USAGE_HINT: &str = "provide classes with ?classes=xxx,xxx&teachers=xxx,xxx";

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const MALFORMED_SOURCE: &str = "MALFORMED_SOURCE";
    pub const FETCH_ERROR: &str = "FETCH_ERROR";
    pub const NO_SELECTOR: &str = "NO_SELECTOR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Result type alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Domain error type.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Structural defect in the upstream document
    #[error("malformed schedule source: {0}")]
    MalformedSource(String),

    /// The schedule source could not be reached
    #[error("failed to fetch schedule: {0}")]
    Fetch(String),

    /// Lessons query without any class or teacher code
    #[error("no class or teacher selector given")]
    NoSelector,

    /// Response body could not be encoded
    #[error("failed to encode response: {0}")]
    Serialization(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ScheduleError {
    /// Create a malformed source error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSource(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::NoSelector => StatusCode::BAD_REQUEST,
            ScheduleError::Fetch(_) => StatusCode::BAD_GATEWAY,
            ScheduleError::MalformedSource(_)
            | ScheduleError::Serialization(_)
            | ScheduleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::MalformedSource(_) => codes::MALFORMED_SOURCE,
            ScheduleError::Fetch(_) => codes::FETCH_ERROR,
            ScheduleError::NoSelector => codes::NO_SELECTOR,
            ScheduleError::Serialization(_) => codes::SERIALIZATION_ERROR,
            ScheduleError::Config(_) => codes::CONFIG_ERROR,
        }
    }
}

impl From<reqwest::Error> for ScheduleError {
    fn from(err: reqwest::Error) -> Self {
        ScheduleError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::MalformedSource(err.to_string())
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ScheduleError::NoSelector => USAGE_HINT.to_string(),
            other => {
                tracing::error!(code = other.error_code(), "Request failed: {}", other);
                other.to_string()
            }
        };
        (status, body).into_response()
    }
}
