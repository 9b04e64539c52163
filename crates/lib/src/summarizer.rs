//! # Summarization Pipeline
//!
//! Runs one request through its stages strictly in sequence:
//! extraction, prompt building, the completion call, and document export.
//! A failure at any stage aborts the request and nothing is kept for a retry.

use crate::{
    errors::SummarizeError,
    export::export_summary_docx,
    extract::extract_text_from_pdf,
    prompts::legal::build_summary_prompt,
    providers::ai::AiProvider,
};
use tracing::{info, instrument};

/// The result of summarizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Characters of text extracted from the source document.
    pub extracted_chars: usize,
    /// Characters of the prompt actually sent to the model.
    pub prompt_chars: usize,
    /// The model's response, unmodified.
    pub text: String,
    /// The `.docx` rendering of `text`.
    pub document: Vec<u8>,
}

/// Summarizes legal documents with a borrowed AI provider.
pub struct Summarizer<'a> {
    ai_provider: &'a dyn AiProvider,
}

impl<'a> Summarizer<'a> {
    pub fn new(ai_provider: &'a dyn AiProvider) -> Self {
        Self { ai_provider }
    }

    /// Summarizes an uploaded PDF.
    #[instrument(skip(self, pdf_data), fields(pdf_bytes = pdf_data.len()))]
    pub async fn summarize_pdf(&self, pdf_data: Vec<u8>) -> Result<Summary, SummarizeError> {
        let text = extract_text_from_pdf(pdf_data).await?;
        self.summarize_text(&text).await
    }

    /// Summarizes already extracted document text.
    #[instrument(skip(self, document_text))]
    pub async fn summarize_text(&self, document_text: &str) -> Result<Summary, SummarizeError> {
        let extracted_chars = document_text.chars().count();
        let prompt = build_summary_prompt(document_text);
        let prompt_chars = prompt.chars().count();
        info!(extracted_chars, prompt_chars, "Built summary prompt.");

        let text = self.ai_provider.generate(&prompt).await?;
        info!("Received summary ({} characters).", text.chars().count());

        let document = export_summary_docx(&text)?;
        info!("Exported summary document ({} bytes).", document.len());

        Ok(Summary {
            extracted_chars,
            prompt_chars,
            text,
            document,
        })
    }
}
