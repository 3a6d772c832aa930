//! Assistant
//!
//! Prompt templates, response parsing and the service that ties them to a
//! completion provider.

pub mod parse;
pub mod prompts;
pub mod service;

pub use service::{AssistantService, IDEA_CATEGORIES, IdeaSource, NotesSource};
