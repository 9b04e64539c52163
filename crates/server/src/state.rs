//! # Application State
//!
//! The shared, read-only state handed to every request handler: the loaded
//! configuration and the AI provider built from it. Requests share nothing else.

use crate::config::AppConfig;
use legalsum::providers::{ai::AiProvider, factory::create_provider};
use std::sync::Arc;
use tracing::warn;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded once at startup.
    pub config: Arc<AppConfig>,
    /// The completion model client used for every summary.
    pub ai_provider: Arc<dyn AiProvider>,
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = create_provider(&config.provider_config())?;

    if config.access_password().is_none() {
        warn!("ACCESS_PASSWORD is not set; every gated request will be rejected.");
    }

    Ok(AppState {
        config: Arc::new(config),
        ai_provider: Arc::from(ai_provider),
    })
}
