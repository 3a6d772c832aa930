//! Provider error types.

use thiserror::Error;

/// Result type for completion calls
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failure talking to the completion endpoint
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure or timeout before a response arrived
    #[error("request to completion endpoint failed: {0}")]
    Request(String),

    /// Endpoint answered with a non-2xx status
    #[error("completion endpoint returned {status}: {message}")]
    Service { status: u16, message: String },

    /// Endpoint answered 2xx but the body carried nothing usable
    #[error("completion endpoint returned an unusable response: {0}")]
    InvalidResponse(String),

    /// Client could not be constructed from the supplied settings
    #[error("provider misconfigured: {0}")]
    Config(String),
}

impl ProviderError {
    /// Transport failures and 5xx answers are worth another attempt; 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Service { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidResponse(_) | Self::Config(_) => false,
        }
    }

    /// Whether the failure came from the service rather than the network
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::InvalidResponse(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Request(format!("timed out: {err}"))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
