//! # Command Handlers

use anyhow::{Context, Result};
use legalsum::{
    extract::extract_text_from_pdf, prompts::legal::build_summary_prompt,
    providers::factory::create_provider, ProviderConfig, Summarizer,
};
use std::path::Path;
use tracing::info;

async fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))
}

/// Returns the text extracted from the PDF at `path`.
pub async fn handle_extract(path: &Path) -> Result<String> {
    let pdf_data = read_pdf(path).await?;
    Ok(extract_text_from_pdf(pdf_data).await?)
}

/// Returns the prompt that `summarize` would send for the PDF at `path`.
pub async fn handle_prompt(path: &Path) -> Result<String> {
    let text = handle_extract(path).await?;
    Ok(build_summary_prompt(&text))
}

/// Summarizes the PDF at `path`, writes the `.docx` to `output`, and returns the
/// summary text.
pub async fn handle_summarize(path: &Path, output: &Path, config: &ProviderConfig) -> Result<String> {
    let pdf_data = read_pdf(path).await?;
    let ai_provider = create_provider(config)?;
    let summarizer = Summarizer::new(ai_provider.as_ref());

    let summary = summarizer.summarize_pdf(pdf_data).await?;

    tokio::fs::write(output, &summary.document)
        .await
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    info!(
        "Wrote {} bytes to {}",
        summary.document.len(),
        output.display()
    );

    Ok(summary.text)
}
