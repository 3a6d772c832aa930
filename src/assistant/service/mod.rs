//! Assistant Service
//!
//! The LLM-backed features: task splitting, idea generation, note cleaning
//! and spending advice. Each call renders one template, makes one completion
//! request and post-processes the text. No state is kept between calls.

mod types;


pub use types::{IDEA_CATEGORIES, IdeaSource, NotesSource};

use super::parse::{parse_ideas, parse_steps};
use super::prompts::{self, IDEA_COUNT};
use crate::error::{AppError, AppResult};
use crate::llm::{LLMRequest, Provider, ProviderError};
use crate::session::{ExpenseRow, finance};
use std::sync::Arc;

/// Runs feature prompts against a completion provider
#[derive(Clone)]
pub struct AssistantService {
    provider: Arc<dyn Provider>,
}

impl AssistantService {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    async fn ask(&self, feature: &str, prompt: String) -> AppResult<String> {
        tracing::debug!(
            "{}: sending {} char prompt to {} ({})",
            feature,
            prompt.len(),
            self.provider.name(),
            self.provider.default_model()
        );
        let response = self.provider.complete(LLMRequest::new(prompt)).await?;
        Ok(response.content)
    }

    /// Break a task into ordered, cleaned steps.
    pub async fn split_task(&self, task: &str) -> AppResult<Vec<String>> {
        let task = task.trim();
        if task.is_empty() {
            return Err(AppError::validation("Please enter a task to generate steps."));
        }

        let raw = self.ask("task_splitter", prompts::task_steps(task)).await?;
        let steps = parse_steps(&raw);
        if steps.is_empty() {
            return Err(ProviderError::InvalidResponse("no steps in the response".into()).into());
        }
        tracing::info!("Task split into {} step(s)", steps.len());
        Ok(steps)
    }

    /// Exactly [`IDEA_COUNT`] distinct ideas, or a service error.
    pub async fn generate_ideas(&self, source: &IdeaSource) -> AppResult<Vec<String>> {
        let prompt = match source {
            IdeaSource::Custom(p) if !p.trim().is_empty() => prompts::ideas_for_prompt(p.trim()),
            IdeaSource::Category(c) if !c.trim().is_empty() => prompts::ideas_for_category(c.trim()),
            _ => {
                return Err(AppError::validation(
                    "Choose a category or enter a custom prompt.",
                ));
            }
        };

        let raw = self.ask("idea_generator", prompt).await?;
        let ideas = parse_ideas(&raw, IDEA_COUNT);
        if ideas.len() < IDEA_COUNT {
            return Err(ProviderError::InvalidResponse(format!(
                "expected {IDEA_COUNT} distinct ideas, got {}",
                ideas.len()
            ))
            .into());
        }
        Ok(ideas)
    }

    /// Clean pasted text or the text layer of an uploaded PDF.
    pub async fn clean_notes(&self, source: NotesSource) -> AppResult<String> {
        let text = match source {
            NotesSource::Pdf(bytes) => crate::import::pdf_text(bytes).await?,
            NotesSource::Pasted(text) => text,
        };
        if text.trim().is_empty() {
            return Err(AppError::validation(
                "Please upload a PDF or paste notes to clean.",
            ));
        }

        self.ask("notes_cleaner", prompts::clean_notes(&text)).await
    }

    /// Free-text budgeting advice for the given expenses.
    pub async fn finance_tip(&self, rows: &[ExpenseRow]) -> AppResult<String> {
        if rows.is_empty() {
            return Err(AppError::validation(
                "Add at least one expense before asking for advice.",
            ));
        }
        let table = finance::summary_table(rows);
        self.ask("finance_advisor", prompts::finance_advice(&table))
            .await
    }
}
