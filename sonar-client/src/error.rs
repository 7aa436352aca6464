//! Error types for the Sonar client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the analysis service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Body returned by the API
        message: String,
    },

    /// Response body is not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid client configuration or request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Whether a later attempt of the same request could succeed
    ///
    /// Connection, proxy and timeout failures, every non-2xx status and
    /// partial bodies are transient. A request that could not even be built
    /// (bad URL, bad client settings) fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !e.is_builder(),
            Self::ApiError { .. } | Self::ParseError(_) => true,
            Self::InvalidRequest(_) => false,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }
}
