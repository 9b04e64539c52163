pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a text-completion model.
///
/// Implementations send the prompt as the sole user turn of a single request
/// and return the first completion's text unmodified.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
