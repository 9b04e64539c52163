//! # Application Configuration
//!
//! This module defines the configuration structure for the `legalsum-server` and
//! the logic for loading it from built-in defaults, an optional `config.yml` file
//! and environment variables. The result is built once at startup and passed to
//! every component; nothing reads the environment after that.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use legalsum::types::{ProviderConfig, DEFAULT_MODEL, DEFAULT_PROVIDER};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The password every gated request must present. Loaded from `ACCESS_PASSWORD`.
    #[serde(default)]
    pub access_password: Option<String>,
    /// The provider type (`"openai"` or `"gemini"`). Loaded from `AI_PROVIDER`.
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,
    /// Overrides the provider's default endpoint. Loaded from `AI_API_URL`.
    #[serde(default)]
    pub ai_api_url: Option<String>,
    /// Loaded from `AI_API_KEY`, falling back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    /// Loaded from `AI_MODEL`.
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}

fn default_ai_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_ai_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl AppConfig {
    /// The provider settings handed to the library's provider factory.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.ai_provider.clone(),
            api_url: non_empty(self.ai_api_url.clone()),
            api_key: non_empty(self.ai_api_key.clone()),
            model_name: self.ai_model.clone(),
        }
    }

    /// The configured password, if one is set and non-empty.
    pub fn access_password(&self) -> Option<&str> {
        self.access_password
            .as_deref()
            .filter(|password| !password.is_empty())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "access_password",
                &self.access_password.as_ref().map(|_| "<redacted>"),
            )
            .field("ai_provider", &self.ai_provider)
            .field("ai_api_url", &self.ai_api_url)
            .field("ai_api_key", &self.ai_api_key.as_ref().map(|_| "<redacted>"))
            .field("ai_model", &self.ai_model)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from defaults, a file and environment variables.
///
/// - Without an override, `config.yml` next to the crate manifest is read if present.
/// - An explicit `config_path_override` must exist.
/// - Top-level keys are overridden by `PORT`, `ACCESS_PASSWORD`, `AI_PROVIDER`,
///   `AI_API_URL`, `AI_API_KEY` and `AI_MODEL`, then by `LEGALSUM_...` variables
///   (e.g., `LEGALSUM_AI_MODEL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Built-in defaults.
        .set_default("port", i64::from(default_port()))?
        .set_default("ai_provider", DEFAULT_PROVIDER)?
        .set_default("ai_model", DEFAULT_MODEL)?;

    // Layer 2: Optional YAML file.
    let (config_path, required) = match config_path_override {
        Some(path) => (path.to_string(), true),
        None => (format!("{}/config.yml", env!("CARGO_MANIFEST_DIR")), false),
    };
    match read_and_substitute(&config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if required => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => {}
    }

    let settings = builder
        // Layer 3: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Prefixed environment variables for explicit overrides.
        .add_source(
            Environment::with_prefix("LEGALSUM")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The conventional OpenAI variable fills the key when nothing else did.
    if non_empty(config.ai_api_key.clone()).is_none() {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.ai_api_key = Some(key);
            }
        }
    }

    Ok(config)
}
