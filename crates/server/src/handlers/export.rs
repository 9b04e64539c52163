//! # Export Handler
//!
//! Re-renders a summary the client already holds as a downloadable `.docx`,
//! so the download needs no server-side state and no second model call.

use super::{AccessGranted, AppError};
use crate::types::ExportRequest;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use legalsum::export::{export_summary_docx, DOCX_FILE_NAME, DOCX_MIME_TYPE};
use tracing::info;

/// The handler for `POST /export`.
pub async fn export_handler(
    _access: AccessGranted,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let document = export_summary_docx(&payload.summary)?;
    info!("Exported summary document ({} bytes).", document.len());

    let disposition = format!("attachment; filename=\"{DOCX_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}
