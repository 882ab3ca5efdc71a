//! Error types for the FormBridge server

use formbridge_core::CoreError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Error raised by the application services
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client could not be built or a request could not be sent
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(format!("{:#}", err))
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
