use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// The result of `POST /summarize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// The model's summary, unmodified.
    pub summary: String,
    /// Suggested name for the downloaded document.
    pub file_name: String,
    pub mime_type: String,
    /// The `.docx` rendering of `summary`, base64-encoded.
    pub document_base64: String,
}

/// The body of `POST /export`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRequest {
    pub summary: String,
}
