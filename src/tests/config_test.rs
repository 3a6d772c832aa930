//! Configuration Loading Tests
//!
//! File layering, defaults, validation and command-line overrides.

use crate::config::{Config, LlmConfig, StartupError};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.address(), "127.0.0.1:8501");
    assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.llm.model, "llama-3.1-8b-instant");
    assert_eq!(config.llm.timeout_secs, 60);
    assert_eq!(config.llm.max_retries, 0);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
[server]
port = 9100

[llm]
model = "llama-3.3-70b-versatile"
temperature = 0.4
"#,
    );

    let config = Config::load_from(Some(file.path())).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
    assert_eq!(config.llm.temperature, Some(0.4));
    assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::load_from(Some(&missing)).is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("[llm]\ntimeout_secs = 0\n");
    let err = Config::load_from(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));

    let mut config = Config::default();
    config.llm.temperature = Some(3.5);
    assert!(matches!(config.validate(), Err(StartupError::Invalid(_))));

    config.llm.temperature = None;
    config.llm.model = "  ".into();
    assert!(matches!(config.validate(), Err(StartupError::Invalid(_))));
}

#[test]
fn test_cli_overrides_win() {
    let config = Config::default().with_overrides(Some("0.0.0.0".into()), Some(8080));
    assert_eq!(config.server.address(), "0.0.0.0:8080");

    let config = Config::default().with_overrides(None, None);
    assert_eq!(config.server.address(), "127.0.0.1:8501");
}

#[test]
fn test_configured_api_key_is_used() {
    let llm = LlmConfig {
        api_key: Some("  gsk_test  ".into()),
        ..LlmConfig::default()
    };
    assert_eq!(llm.resolve_api_key().unwrap().as_str(), "gsk_test");
}

#[test]
fn test_debug_output_redacts_api_key() {
    let llm = LlmConfig {
        api_key: Some("gsk_secret".into()),
        ..LlmConfig::default()
    };
    let debug = format!("{llm:?}");
    assert!(!debug.contains("gsk_secret"));
    assert!(debug.contains("<redacted>"));
}
