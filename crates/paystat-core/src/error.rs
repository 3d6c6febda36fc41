use std::time::Duration;

use thiserror::Error;

/// Application-wide error types for paystat.
#[derive(Error, Debug)]
pub enum AppError {
    /// Provider answered with a non-success status, or the request could not be built.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body is not the page shape the provider is expected to return.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A required API token is absent.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if the error came from talking to a provider over the wire.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::NetworkError(_) | AppError::Timeout(_)
        )
    }
}
