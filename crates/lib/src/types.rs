use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Settings for the completion model provider.
///
/// Built once by the caller (server config, CLI flags) and handed to
/// [`create_provider`](crate::providers::factory::create_provider).
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The type of provider (`"openai"` or `"gemini"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Derived from the model name for Gemini when unset.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key. A provider without one fails at call time, not at startup.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model_name: String,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .finish()
    }
}
