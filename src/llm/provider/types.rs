use serde::{Deserialize, Serialize};

/// A single-turn completion request
#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    /// Rendered prompt sent as the user message
    pub prompt: String,

    /// Model override; the provider default is used when `None`
    pub model: Option<String>,

    /// Sampling temperature override
    pub temperature: Option<f32>,

    /// Completion length cap override
    pub max_tokens: Option<u32>,
}

impl LLMRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Token accounting reported by the endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Completion returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct LLMResponse {
    /// Endpoint-assigned response id (may be empty)
    pub id: String,

    /// Model that actually answered
    pub model: String,

    /// Generated text, trimmed
    pub content: String,

    pub usage: TokenUsage,
}

// ── OpenAI-compatible wire format ───────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetail {
    pub message: String,
}
