//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml`, then `COMMAND_CENTER_*` environment variables
//! (`COMMAND_CENTER_LLM__MODEL=...`).

mod types;

pub use types::{Config, LlmConfig, LoggingConfig, ServerConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zeroize::Zeroizing;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "COMMAND_CENTER";

/// Credential fallback read when `llm.api_key` is not configured
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Fatal problems detected before the server starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "no API key configured: set {API_KEY_ENV} or COMMAND_CENTER_LLM__API_KEY in the environment"
    )]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Directory holding `config.toml` (`~/.config/command-center` on Linux)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("command-center")
}

impl Config {
    /// Load from an explicit file, or `config.toml` in [`config_dir`] when
    /// `None`. An explicitly named file must exist; the default may be absent.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_dir().join("config.toml"), false),
        };

        tracing::debug!("Loading config from {} (required={})", file.display(), required);

        let config: Config = ::config::Config::builder()
            .add_source(
                ::config::File::from(file.as_path())
                    .format(::config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file.display()))?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later at request time.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(StartupError::Invalid("llm.base_url is empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(StartupError::Invalid("llm.model is empty".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(StartupError::Invalid("llm.timeout_secs must be > 0".into()));
        }
        if let Some(t) = self.llm.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(StartupError::Invalid(format!(
                "llm.temperature {t} is outside 0.0..=2.0"
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded layers.
    pub fn with_overrides(mut self, bind: Option<String>, port: Option<u16>) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

impl LlmConfig {
    /// Resolve the bearer credential: configured value first, then `GROQ_API_KEY`.
    pub fn resolve_api_key(&self) -> Result<Zeroizing<String>, StartupError> {
        let from_config = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        let key = match from_config {
            Some(k) => k,
            None => std::env::var(API_KEY_ENV)
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .ok_or(StartupError::MissingApiKey)?,
        };
        Ok(Zeroizing::new(key))
    }
}
