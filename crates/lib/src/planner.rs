//! # Chunk Planner
//!
//! Maps a size tier to a chunk count and per-chunk token budget, and derives
//! the sampling temperature for each chunk index so later chunks are more
//! exploratory than earlier ones.

use crate::types::{ChunkPlan, SizeTier};

/// The sampling temperature used for the first chunk (and for single-chunk runs).
const BASE_TEMPERATURE: f32 = 0.3;
/// The additional temperature spread applied linearly across later chunks.
const TEMPERATURE_SPREAD: f32 = 0.6;

/// Returns the fixed chunk plan for a size tier.
pub fn plan_chunks(tier: SizeTier) -> ChunkPlan {
    let (chunk_count, tokens_per_chunk) = match tier {
        SizeTier::Small => (1, 1024),
        SizeTier::Medium => (3, 1024),
        SizeTier::Large => (8, 1024),
    };
    ChunkPlan {
        chunk_count,
        tokens_per_chunk,
    }
}

/// Computes the sampling temperature for a chunk index.
///
/// Interpolates linearly from 0.3 for the first chunk to 0.9 for the last.
/// A single-chunk run always uses the baseline; the `total <= 1` guard also
/// keeps the interpolation divisor non-zero.
pub fn temperature(chunk_index: usize, total_chunks: usize) -> f32 {
    if total_chunks <= 1 {
        return BASE_TEMPERATURE;
    }
    BASE_TEMPERATURE + TEMPERATURE_SPREAD * (chunk_index as f32 / (total_chunks - 1) as f32)
}
