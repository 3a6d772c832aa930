//! OpenAI-compatible chat completions client (Groq by default).

use super::error::{ProviderError, Result};
use super::types::{
    ChatMessage, ChatRequest, ChatResponse, ErrorBody, LLMRequest, LLMResponse, TokenUsage,
};
use super::Provider;
use crate::config::LlmConfig;
use async_trait::async_trait;
use std::time::Duration;
use zeroize::Zeroizing;

/// Base delay between retry attempts; grows linearly with the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Client for any endpoint exposing `POST {base_url}/chat/completions`
pub struct OpenAICompatibleProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Zeroizing<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    max_retries: u32,
}

impl OpenAICompatibleProvider {
    pub fn new(settings: &LlmConfig, api_key: Zeroizing<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        let endpoint = format!(
            "{}/chat/completions",
            settings.base_url.trim_end_matches('/')
        );

        tracing::debug!(
            "Completion provider ready: endpoint={}, model={}, timeout={}s, retries={}",
            endpoint,
            settings.model,
            settings.timeout_secs,
            settings.max_retries
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            max_retries: settings.max_retries,
        })
    }

    async fn send_once(&self, body: &ChatRequest<'_>) -> Result<LLMResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key.as_str()))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(parsed) => parsed.error.message,
                Err(_) if text.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
                Err(_) => text.chars().take(300).collect(),
            };
            return Err(ProviderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("response carried no completion text".to_string())
            })?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            id: parsed.id,
            model: if parsed.model.is_empty() {
                body.model.to_string()
            } else {
                parsed.model
            },
            content,
            usage,
        })
    }
}

#[async_trait]
impl Provider for OpenAICompatibleProvider {
    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature.or(self.temperature),
            max_tokens: request.max_tokens.or(self.max_tokens),
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(response) => {
                    tracing::info!(
                        "Completion ok: model={}, prompt_chars={}, tokens in/out={}/{}",
                        response.model,
                        request.prompt.len(),
                        response.usage.input_tokens,
                        response.usage.output_tokens
                    );
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Completion attempt {}/{} failed: {}",
                        attempt,
                        self.max_retries + 1,
                        e
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => {
                    tracing::error!("Completion failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}
