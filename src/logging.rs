//! Tracing subscriber setup: stderr always, plus an optional daily rolling
//! file when `logging.dir` is set.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const LOG_FILE_PREFIX: &str = "command-center";
const MAX_LOG_FILES: usize = 7;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Filter from `RUST_LOG` if set, otherwise the configured level scoped to
/// this crate (or `debug` when forced).
pub fn env_filter(config: &LoggingConfig, debug: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if debug { "debug" } else { config.level.as_str() };
    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
    EnvFilter::try_new(format!("warn,{crate_name}={level},tower_http={level}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{crate_name}=info")))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed.
pub fn init(config: &LoggingConfig, debug: bool) -> Result<Option<WorkerGuard>> {
    let stderr: BoxedLayer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let mut layers = vec![stderr];
    let mut guard = None;

    if !config.dir.trim().is_empty() {
        let (layer, file_guard) = file_layer(Path::new(config.dir.trim()), config.json)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(config, debug))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if !config.dir.trim().is_empty() {
        tracing::info!("Logging: writing files to {}", config.dir.trim());
    }
    Ok(guard)
}

fn file_layer(dir: &Path, json: bool) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer: BoxedLayer = if json {
        fmt::layer().json().with_writer(writer).with_ansi(false).boxed()
    } else {
        fmt::layer().with_writer(writer).with_ansi(false).boxed()
    };
    Ok((layer, guard))
}
