//! # Request Handlers
//!
//! The HTTP surface of the generation service. The `/generate` handler owns
//! persistence of results; the generation core itself knows nothing about
//! storage.

use crate::{
    errors::AppError,
    state::AppState,
    storage::{self, NewGeneration},
};
use axum::{extract::State, Json};
use serde::Serialize;
use synthgen::{GenerationRequest, OutputFormat};
use tracing::{error, info};

/// The root handler.
pub async fn root() -> &'static str {
    "synthgen server is running."
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The response body for the `/generate` endpoint.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub data: String,
    pub format: OutputFormat,
    pub chunk_count: usize,
    pub record_count: usize,
    /// Whether the result was persisted. Generation succeeding but storage
    /// failing still returns the data, flagged as unstored.
    pub stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// The handler for the `POST /generate` endpoint.
///
/// Runs the full chunked generation loop and then persists the merged result.
/// A generation failure aborts with an error response; a storage failure
/// after all retries degrades to `stored: false` with the data intact.
pub async fn generate_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    info!(
        format = %payload.format,
        "Received generation request: '{}'",
        payload.prompt
    );

    let output = app_state.generation_client.generate(&payload).await?;

    let record = NewGeneration {
        prompt: payload.prompt.clone(),
        format: payload.format.to_string(),
        size_tier: payload.size_tier.to_string(),
        generated_data: output.data.clone(),
        chunk_count: output.chunk_count as i64,
        record_count: output.record_count as i64,
    };

    let (stored, record_id) = match storage::insert_generation(
        &app_state.db,
        record,
        &app_state.retry_policy,
        app_state.collision_strategy.as_ref(),
    )
    .await
    {
        Ok(id) => (true, Some(id)),
        Err(e) => {
            error!("Generated data could not be stored: {e:?}");
            (false, None)
        }
    };

    Ok(Json(GenerateResponse {
        data: output.data,
        format: output.format,
        chunk_count: output.chunk_count,
        record_count: output.record_count,
        stored,
        record_id,
    }))
}
