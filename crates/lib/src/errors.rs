use crate::types::OutputFormat;
use thiserror::Error;

/// Custom error types for the generation pipeline.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to completion provider: {0}")]
    CompletionRequest(reqwest::Error),
    #[error("Failed to deserialize completion provider response: {0}")]
    CompletionDeserialization(reqwest::Error),
    #[error("Completion provider returned an error: {0}")]
    CompletionApi(String),
    #[error("Completion provider returned empty content for chunk {chunk_index}")]
    EmptyCompletion { chunk_index: usize },
    #[error("Failed to extract valid {0} data from model output")]
    Extraction(OutputFormat),
    #[error("A completion provider is required")]
    MissingCompletionProvider,
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
