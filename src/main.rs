use anyhow::{Context, Result};
use clap::Parser;
use command_center::assistant::AssistantService;
use command_center::cli::Cli;
use command_center::config::Config;
use command_center::llm::{OpenAICompatibleProvider, Provider};
use command_center::logging;
use command_center::session::SessionStore;
use command_center::web::{self, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.as_deref())?.with_overrides(cli.bind, cli.port);
    let _log_guard = logging::init(&config.logging, cli.debug)?;

    let api_key = config.llm.resolve_api_key()?;
    let provider = OpenAICompatibleProvider::new(&config.llm, api_key)
        .context("Failed to create completion client")?;
    let model = provider.default_model().to_string();
    let assistant = AssistantService::new(Arc::new(provider));
    tracing::info!(
        "Using {} model {} at {}",
        assistant.provider_name(),
        model,
        config.llm.base_url
    );

    let state = AppState::new(assistant, SessionStore::new(config.server.session_ttl()));
    web::serve(state, &config.server).await
}
