//! # Summarize Handler
//!
//! Accepts one uploaded PDF and runs it through the summarization pipeline.

use super::{wrap_response, AccessGranted, ApiResponse, AppError, AppState, DebugParams};
use crate::types::SummarizeResponse;
use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use base64::{engine::general_purpose, Engine as _};
use legalsum::{
    export::{DOCX_FILE_NAME, DOCX_MIME_TYPE},
    Summarizer,
};
use serde_json::json;
use tracing::info;

/// The multipart part holding the PDF.
pub const FILE_PART: &str = "file";

/// The handler for `POST /summarize`.
///
/// The access check runs first, so an unauthorized upload is never read.
pub async fn summarize_handler(
    _access: AccessGranted,
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<SummarizeResponse>>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_PART) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(format!(
                "Expected exactly one '{FILE_PART}' part in multipart upload."
            )));
        }
        let file_name = field.file_name().unwrap_or("document.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (source_name, pdf_data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{FILE_PART}' part in multipart upload."))
    })?;
    let pdf_bytes = pdf_data.len();
    info!("Summarize request for '{}' ({} bytes).", source_name, pdf_bytes);

    let summarizer = Summarizer::new(app_state.ai_provider.as_ref());
    let summary = summarizer.summarize_pdf(pdf_data).await?;

    let debug_info = json!({
        "source_file": source_name,
        "pdf_bytes": pdf_bytes,
        "extracted_chars": summary.extracted_chars,
        "prompt_chars": summary.prompt_chars,
        "document_bytes": summary.document.len(),
    });

    let response = SummarizeResponse {
        summary: summary.text,
        file_name: DOCX_FILE_NAME.to_string(),
        mime_type: DOCX_MIME_TYPE.to_string(),
        document_base64: general_purpose::STANDARD.encode(&summary.document),
    };

    Ok(wrap_response(response, debug_params, Some(debug_info)))
}
