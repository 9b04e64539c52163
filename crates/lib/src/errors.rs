use thiserror::Error;

/// Errors raised while talking to the completion model.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),
}

/// Errors raised while decoding an uploaded PDF.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse PDF content: {0}")]
    Decode(#[from] lopdf::Error),
    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// Errors raised while serializing the summary document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write DOCX package: {0}")]
    Pack(String),
}

/// The failure of one summarization request, tagged by the stage that failed.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error(transparent)]
    Decode(#[from] ExtractError),
    #[error(transparent)]
    Upstream(#[from] PromptError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
