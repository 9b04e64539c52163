//! # legalsum
//!
//! Summarizes PDF legal documents with a text-completion model.
//!
//! The crate covers the whole request pipeline: text extraction (page text plus
//! form-field values), the fixed summary prompt, the model client, and export of
//! the summary as a `.docx` document. HTTP and command-line shells live in their
//! own crates and drive [`Summarizer`].

pub mod errors;
pub mod export;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod summarizer;
pub mod types;

pub use errors::{ExportError, ExtractError, PromptError, SummarizeError};
pub use summarizer::{Summarizer, Summary};
pub use types::ProviderConfig;
