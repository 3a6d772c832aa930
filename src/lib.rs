//! Student Command Center
//!
//! A small local web app bundling five study helpers: a task splitter, a
//! todo list, an idea generator, a notes cleaner and an expense tracker.
//! The text features are backed by an OpenAI-compatible completion API.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod llm;
pub mod logging;
pub mod session;
pub mod web;

#[cfg(test)]
mod tests;
