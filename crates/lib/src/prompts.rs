//! # Generation Prompts
//!
//! Default prompt text for the chunked generation pipeline: the per-format
//! system instructions, the rotating diversity modifiers, and the composer
//! that builds one chunk's user prompt from the base prompt and prior chunks.

use crate::types::{ChunkData, OutputFormat};

/// How many characters of each prior chunk are quoted back to the model when
/// instructing it to avoid repetition.
const PRIOR_CHUNK_PREVIEW_CHARS: usize = 100;

pub const JSON_SYSTEM_PROMPT: &str = "You are a synthetic data generator. Always respond with valid JSON data only. Do not include any explanatory text, markdown formatting, or code blocks. Just return the raw JSON array or object.";

pub const CSV_SYSTEM_PROMPT: &str = "You are a synthetic data generator. Always respond with valid CSV data only. The first line must be the header row. Do not include any explanatory text or markdown formatting.";

pub const TEXT_SYSTEM_PROMPT: &str = "You are a synthetic data generator. Respond with plain text only. Do not include any markdown formatting or commentary about the data.";

/// Rotating style hints appended per chunk index to vary chunk content.
pub const DIVERSITY_MODIFIERS: [&str; 8] = [
    "Focus on common scenarios",
    "Include edge cases and unusual scenarios",
    "Emphasize extreme or rare cases",
    "Mix different categories or types",
    "Use contrasting or opposing elements",
    "Incorporate unexpected or surprising elements",
    "Focus on niche or specialized scenarios",
    "Blend multiple perspectives or approaches",
];

pub const JSON_FORMAT_INSTRUCTIONS: &str = "Ensure the output is in valid JSON format. Do not include any explanatory text outside the JSON structure.";

pub const CSV_FORMAT_INSTRUCTIONS: &str = "Ensure the output is valid CSV with a single header row and comma-separated values.";

const ADDITIONAL_INSTRUCTIONS: &str = r#"
- If generating data for training language models, structure the data as an array of question-answer pairs.
- If the prompt involves real-world data projection, provide data that extends the trend.
- For common data types (e.g., user profiles, transactions), ensure data realism and field completeness."#;

/// Returns the system instruction for the requested output format.
pub fn system_prompt(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => JSON_SYSTEM_PROMPT,
        OutputFormat::Csv => CSV_SYSTEM_PROMPT,
        OutputFormat::Text => TEXT_SYSTEM_PROMPT,
    }
}

/// Composes the user prompt for one chunk.
///
/// The result is the base prompt, a rotating diversity modifier selected by
/// `chunk_index % 8`, an instruction summarizing prior chunk content (only
/// when prior chunks exist), and format-specific output constraints. This is
/// a pure function: the same inputs always produce the same prompt.
pub fn build_chunk_prompt(
    base_prompt: &str,
    chunk_index: usize,
    previous_chunks: &[ChunkData],
    format: OutputFormat,
) -> String {
    let diversity_instructions = if chunk_index > 0 && !previous_chunks.is_empty() {
        let previous_summary = previous_chunks
            .iter()
            .map(|chunk| chunk.preview(PRIOR_CHUNK_PREVIEW_CHARS))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "Generate completely different data from the following examples: {previous_summary}. Ensure maximum diversity and uniqueness."
        )
    } else {
        String::new()
    };

    let modifier = DIVERSITY_MODIFIERS[chunk_index % DIVERSITY_MODIFIERS.len()];

    let format_instructions = match format {
        OutputFormat::Json => JSON_FORMAT_INSTRUCTIONS,
        OutputFormat::Csv => CSV_FORMAT_INSTRUCTIONS,
        OutputFormat::Text => "",
    };

    format!(
        "{base_prompt} {modifier}. {diversity_instructions} {format_instructions} {ADDITIONAL_INSTRUCTIONS}"
    )
}
