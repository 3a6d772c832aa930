//! LLM Module
//!
//! Thin client for the hosted completion endpoint that backs every feature.

pub mod provider;

pub use provider::{
    LLMRequest, LLMResponse, OpenAICompatibleProvider, Provider, ProviderError, TokenUsage,
};
