//! # Configuration Tests
//!
//! Covers the layering in `get_config`: defaults, an explicit YAML file with
//! `${VAR}` substitution, and environment overrides. Environment variables are
//! process-global, so every test here runs under `#[serial]`.

use legalsum_server::config::{get_config, ConfigError};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;

const CONFIG_VARS: &[&str] = &[
    "PORT",
    "ACCESS_PASSWORD",
    "AI_PROVIDER",
    "AI_API_URL",
    "AI_API_KEY",
    "AI_MODEL",
    "OPENAI_API_KEY",
    "LEGALSUM_AI_MODEL",
    "LEGALSUM_TEST_PASSWORD",
];

/// Clears every variable `get_config` reads, for a clean slate.
fn clear_env_vars() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yml");
    fs::write(&path, content).expect("Failed to write config file");
    let path = path.to_str().expect("temp path is UTF-8").to_string();
    (dir, path)
}

#[test]
#[serial]
fn test_defaults_without_file_or_env() {
    clear_env_vars();
    let (_dir, path) = write_config("{}\n");

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.port, 9090);
    assert_eq!(config.ai_provider, "openai");
    assert_eq!(config.ai_model, "gpt-4o-mini");
    assert!(config.access_password().is_none());
    assert!(config.ai_api_key.is_none());
}

#[test]
#[serial]
fn test_env_vars_override_defaults() {
    clear_env_vars();
    env::set_var("PORT", "9999");
    env::set_var("ACCESS_PASSWORD", "hunter2");
    env::set_var("AI_PROVIDER", "gemini");
    env::set_var("AI_API_URL", "http://localhost:1234");
    env::set_var("AI_API_KEY", "test-api-key");
    env::set_var("AI_MODEL", "test-model");
    let (_dir, path) = write_config("{}\n");

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.port, 9999);
    assert_eq!(config.access_password(), Some("hunter2"));
    assert_eq!(config.ai_provider, "gemini");
    assert_eq!(config.ai_api_url.as_deref(), Some("http://localhost:1234"));
    assert_eq!(config.ai_api_key.as_deref(), Some("test-api-key"));
    assert_eq!(config.ai_model, "test-model");

    let provider = config.provider_config();
    assert_eq!(provider.provider, "gemini");
    assert_eq!(provider.model_name, "test-model");

    clear_env_vars();
}

#[test]
#[serial]
fn test_yaml_file_with_substitution() {
    clear_env_vars();
    env::set_var("LEGALSUM_TEST_PASSWORD", "from-env");
    let (_dir, path) = write_config(
        r#"
port: 8181
access_password: "${LEGALSUM_TEST_PASSWORD}"
ai_model: "gpt-4o"
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.port, 8181);
    assert_eq!(config.access_password(), Some("from-env"));
    assert_eq!(config.ai_model, "gpt-4o");

    clear_env_vars();
}

#[test]
#[serial]
fn test_prefixed_env_var_wins_over_file() {
    clear_env_vars();
    env::set_var("LEGALSUM_AI_MODEL", "prefixed-model");
    let (_dir, path) = write_config("ai_model: \"file-model\"\n");

    let config = get_config(Some(&path)).expect("Configuration should load");
    assert_eq!(config.ai_model, "prefixed-model");

    clear_env_vars();
}

#[test]
#[serial]
fn test_openai_api_key_fallback() {
    clear_env_vars();
    env::set_var("OPENAI_API_KEY", "sk-fallback");
    let (_dir, path) = write_config("{}\n");

    let config = get_config(Some(&path)).expect("Configuration should load");
    assert_eq!(config.ai_api_key.as_deref(), Some("sk-fallback"));

    env::set_var("AI_API_KEY", "sk-explicit");
    let config = get_config(Some(&path)).expect("Configuration should load");
    assert_eq!(config.ai_api_key.as_deref(), Some("sk-explicit"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_empty_password_counts_as_unset() {
    clear_env_vars();
    env::set_var("ACCESS_PASSWORD", "");
    let (_dir, path) = write_config("{}\n");

    let config = get_config(Some(&path)).expect("Configuration should load");
    assert!(config.access_password().is_none());

    clear_env_vars();
}

#[test]
#[serial]
fn test_debug_output_redacts_secrets() {
    clear_env_vars();
    env::set_var("ACCESS_PASSWORD", "hunter2");
    env::set_var("AI_API_KEY", "sk-secret");
    let (_dir, path) = write_config("{}\n");

    let config = get_config(Some(&path)).expect("Configuration should load");
    let debug = format!("{config:?}");

    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("<redacted>"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();
    let result = get_config(Some("/definitely/not/here/config.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}
