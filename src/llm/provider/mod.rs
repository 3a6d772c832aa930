//! Completion Providers
//!
//! `Provider` is the seam every feature talks through. The production
//! implementation speaks the OpenAI-compatible chat completions protocol;
//! tests plug in their own mocks.

mod error;
mod openai_compat;
mod types;

pub use error::{ProviderError, Result};
pub use openai_compat::OpenAICompatibleProvider;
pub use types::{LLMRequest, LLMResponse, TokenUsage};

use async_trait::async_trait;

/// A hosted completion endpoint
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send one prompt and wait for the full completion.
    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse>;

    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;
}
