//! # AI Provider Factory
//!
//! Turns a [`ProviderConfig`] into a ready-to-use provider. Any consumer (server,
//! cli) builds its provider here, so every shell talks to the model the same way.

use crate::{
    errors::PromptError,
    providers::ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
    types::{ProviderConfig, DEFAULT_OPENAI_API_URL},
};
use tracing::{info, warn};

/// Creates the provider described by `config`.
///
/// A missing API key does not fail here; the provider reports it on first use.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    if config.api_key.as_deref().unwrap_or_default().is_empty() {
        warn!(
            "No API key configured for provider '{}'; summarization requests will fail.",
            config.provider
        );
    }

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "openai" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());
            info!(
                "Configuring OpenAI provider with URL: {} (model: {})",
                api_url, config.model_name
            );
            Box::new(OpenAiProvider::new(
                api_url,
                config.api_key.clone(),
                config.model_name.clone(),
            )?)
        }
        "gemini" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| GeminiProvider::endpoint_for(&config.model_name));
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(api_url, config.api_key.clone())?)
        }
        other => return Err(PromptError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}
