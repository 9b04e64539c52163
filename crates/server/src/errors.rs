use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legalsum::{ExportError, PromptError, SummarizeError};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Every failure a request can hit ends up here, and the variant decides the
/// HTTP status and the message shown to the user.
#[derive(Debug)]
pub enum AppError {
    /// The access password was missing or wrong.
    AccessDenied,
    /// The request did not carry a usable upload.
    BadRequest(String),
    /// A stage of the summarization pipeline failed.
    Summarize(SummarizeError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<SummarizeError> for AppError {
    fn from(err: SummarizeError) -> Self {
        AppError::Summarize(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Summarize(SummarizeError::Export(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::AccessDenied => (
                StatusCode::UNAUTHORIZED,
                "Incorrect access password.".to_string(),
            ),
            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Summarize(err) => {
                // Log the original error for debugging purposes
                error!("SummarizeError: {:?}", err);
                match err {
                    SummarizeError::Decode(e) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        format!("Could not read the uploaded PDF: {e}"),
                    ),
                    SummarizeError::Upstream(e) => (StatusCode::BAD_GATEWAY, upstream_message(&e)),
                    SummarizeError::Export(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build the summary document: {e}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

fn upstream_message(err: &PromptError) -> String {
    match err {
        PromptError::MissingApiKey => {
            "The summarization service is not configured with an API key.".to_string()
        }
        PromptError::AiRequest(e) => format!("Request to AI provider failed: {e}"),
        PromptError::AiDeserialization(e) => {
            format!("Failed to deserialize AI provider response: {e}")
        }
        PromptError::AiApi(e) => format!("AI provider returned an error: {e}"),
        PromptError::ReqwestClientBuild(e) => format!("Failed to build HTTP client: {e}"),
        PromptError::UnsupportedProvider(name) => format!("Unsupported AI provider: {name}"),
    }
}
