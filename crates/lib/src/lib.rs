//! # Chunked Synthetic Data Generation
//!
//! This crate turns a prompt, an output format, and a size tier into one
//! merged blob of model-generated data. A request is split into chunks, each
//! chunk is generated by a configurable completion provider with its own
//! temperature and prompt, parsed out of the raw model text, filtered for
//! near-duplicates against earlier chunks, and finally merged.

pub mod errors;
pub mod extract;
pub mod merge;
pub mod planner;
pub mod prompts;
pub mod providers;
pub mod similarity;
pub mod types;

pub use errors::GenerationError;
pub use types::{
    ChunkData, ChunkPlan, GenerationClient, GenerationClientBuilder, GenerationOutput,
    GenerationRequest, OutputFormat, SizeTier,
};

use providers::ai::CompletionRequest;
use tracing::{debug, info};

impl GenerationClient {
    /// Runs the full chunked generation loop for one request.
    ///
    /// Chunks are generated strictly sequentially: each chunk's prompt
    /// summarizes all previously accepted chunks, so there is nothing to
    /// parallelize. A failed completion or extraction on any chunk aborts
    /// the whole request rather than silently returning a partial dataset;
    /// merging, by contrast, always produces best-effort output.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let plan = planner::plan_chunks(request.size_tier);
        info!(
            format = %request.format,
            chunk_count = plan.chunk_count,
            "[generate] planned chunked generation"
        );

        let mut accepted_chunks: Vec<ChunkData> = Vec::with_capacity(plan.chunk_count);

        for chunk_index in 0..plan.chunk_count {
            let temperature = planner::temperature(chunk_index, plan.chunk_count);
            let user_prompt = prompts::build_chunk_prompt(
                &request.prompt,
                chunk_index,
                &accepted_chunks,
                request.format,
            );

            let completion_request = CompletionRequest {
                system_prompt: prompts::system_prompt(request.format).to_string(),
                user_prompt,
                temperature,
                max_tokens: plan.tokens_per_chunk,
            };

            debug!(chunk_index, temperature, "[generate] requesting chunk");
            let content = self
                .completion_provider
                .complete(&completion_request)
                .await?;

            if content.trim().is_empty() {
                return Err(GenerationError::EmptyCompletion { chunk_index });
            }
            debug!(chunk_index, "[generate] raw completion: {content}");

            let extracted = extract::extract(&content, request.format)?;

            // The first chunk has no past to be compared against.
            let chunk = if chunk_index == 0 {
                extracted
            } else {
                similarity::filter_chunk(extracted, &accepted_chunks)
            };

            accepted_chunks.push(chunk);
        }

        let output = merge::merge_chunks(&accepted_chunks, request.format);
        info!(
            chunk_count = output.chunk_count,
            record_count = output.record_count,
            "[generate] merged generation output"
        );
        Ok(output)
    }
}
