//! # Summary Document Export
//!
//! Wraps the model's summary in a minimal Word document: one level-1 heading and
//! one paragraph holding the summary verbatim. Markdown-style bullets in the
//! summary stay literal text.

use crate::errors::ExportError;
use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};
use std::io::Cursor;

pub const SUMMARY_HEADING: &str = "Legal Document Summary";
pub const HEADING_STYLE_ID: &str = "Heading1";
pub const DOCX_FILE_NAME: &str = "summary.docx";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Serializes `summary` into an in-memory `.docx` package.
pub fn export_summary_docx(summary: &str) -> Result<Vec<u8>, ExportError> {
    let heading = Paragraph::new()
        .style(HEADING_STYLE_ID)
        .add_run(Run::new().add_text(SUMMARY_HEADING));
    let body = Paragraph::new().add_run(summary_run(summary));

    let mut buffer = Cursor::new(Vec::new());
    Docx::new()
        .add_style(
            Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
                .name("Heading 1")
                .bold()
                .size(32),
        )
        .add_paragraph(heading)
        .add_paragraph(body)
        .build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Pack(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// One run carrying the whole summary. Line feeds become line breaks and tabs
/// become tab characters, so the paragraph reads back as the original text.
fn summary_run(summary: &str) -> Run {
    let mut run = Run::new();
    for (line_index, line) in summary.split('\n').enumerate() {
        if line_index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (tab_index, segment) in line.split('\t').enumerate() {
            if tab_index > 0 {
                run = run.add_tab();
            }
            if !segment.is_empty() {
                run = run.add_text(segment);
            }
        }
    }
    run
}
