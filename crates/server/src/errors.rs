use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use synthgen::GenerationError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the
/// server, allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the generation core.
    Generation(GenerationError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
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
            AppError::Generation(err) => {
                error!("GenerationError: {:?}", err);
                match err {
                    GenerationError::CompletionRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to completion provider failed: {e}"),
                    ),
                    GenerationError::CompletionDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize completion provider response: {e}"),
                    ),
                    GenerationError::CompletionApi(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Completion provider error: {e}"),
                    ),
                    GenerationError::EmptyCompletion { chunk_index } => (
                        StatusCode::BAD_GATEWAY,
                        format!("Completion provider returned no content for chunk {chunk_index}"),
                    ),
                    GenerationError::Extraction(format) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Model output did not contain valid {format} data"),
                    ),
                    GenerationError::MissingCompletionProvider => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    GenerationError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                    GenerationError::JsonSerialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    GenerationError::Regex(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal regex error: {e}"),
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
