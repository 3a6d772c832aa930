//! Application error taxonomy
//!
//! Validation failures are shown inline next to the form that caused them;
//! completion failures become a generic banner; export failures are a 500.

use crate::export::ExportError;
use crate::llm::ProviderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad user input; the action is aborted and the session is untouched
    #[error("{0}")]
    Validation(String),

    /// Network or service failure talking to the completion endpoint
    #[error(transparent)]
    Llm(#[from] ProviderError),

    /// File encoding failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Llm(_) => StatusCode::BAD_GATEWAY,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show in the page. Upstream details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Llm(e) if e.is_service_error() => {
                "The AI service returned an error. Please try again in a moment.".to_string()
            }
            Self::Llm(_) => {
                "Could not reach the AI service. Check your connection and try again.".to_string()
            }
            Self::Export(_) => "The file could not be generated.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.is_validation() {
            tracing::error!("Request failed: {}", self);
        }
        (self.status(), self.user_message()).into_response()
    }
}
