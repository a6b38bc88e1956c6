use crate::{errors::GenerationError, providers::ai::CompletionProvider};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The output format requested for a generation run.
///
/// `TXT` is accepted as a legacy alias for `TEXT` in inbound payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "CSV")]
    Csv,
    #[serde(rename = "TEXT", alias = "TXT")]
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Csv => "CSV",
            OutputFormat::Text => "TEXT",
        };
        write!(f, "{name}")
    }
}

/// The coarse, user-facing size control for a generation run.
///
/// Unrecognized tier strings resolve to `Small`. This is a deliberate
/// permissive default at the deserialization boundary, not validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SizeTier {
    #[default]
    Small,
    Medium,
    Large,
}

impl From<String> for SizeTier {
    fn from(value: String) -> Self {
        match value.as_str() {
            "medium" => SizeTier::Medium,
            "large" => SizeTier::Large,
            _ => SizeTier::Small,
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        };
        write!(f, "{name}")
    }
}

/// The immutable input to a generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default, alias = "data_size", alias = "dataSize")]
    pub size_tier: SizeTier,
}

/// How a size tier translates into completion calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    pub chunk_count: usize,
    pub tokens_per_chunk: u32,
}

/// The extracted, format-typed value for one chunk.
///
/// Produced once per chunk index by the extractor; the similarity filter is
/// the only consumer allowed to remove entries afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkData {
    /// A sequence of JSON records.
    Records(Vec<Value>),
    /// A CSV blob whose first line is the header.
    Table(String),
    /// Free text.
    Text(String),
}

impl ChunkData {
    /// Returns the first `limit` characters of the chunk's string form,
    /// used to summarize prior chunks in diversity instructions.
    pub fn preview(&self, limit: usize) -> String {
        let rendered = match self {
            ChunkData::Records(records) => {
                serde_json::to_string(records).unwrap_or_default()
            }
            ChunkData::Table(table) => table.clone(),
            ChunkData::Text(text) => text.clone(),
        };
        rendered.chars().take(limit).collect()
    }

    /// The number of entries this chunk contributes to the merged output.
    pub fn record_count(&self) -> usize {
        match self {
            ChunkData::Records(records) => records.len(),
            ChunkData::Table(table) => table.lines().count().saturating_sub(1),
            ChunkData::Text(_) => 1,
        }
    }
}

/// The final merged artifact of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    /// The merged blob in the requested format.
    pub data: String,
    pub format: OutputFormat,
    /// How many chunks were generated and accepted.
    pub chunk_count: usize,
    /// How many records survived filtering across all chunks.
    pub record_count: usize,
}

/// A client that drives the chunked generation loop against a completion provider.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    pub(crate) completion_provider: Box<dyn CompletionProvider>,
}

/// A builder for creating `GenerationClient` instances.
#[derive(Debug, Default)]
pub struct GenerationClientBuilder {
    completion_provider: Option<Box<dyn CompletionProvider>>,
}

impl GenerationClientBuilder {
    /// Creates a new `GenerationClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider.
    pub fn completion_provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.completion_provider = Some(provider);
        self
    }

    /// Builds the `GenerationClient`, failing if no provider was configured.
    pub fn build(self) -> Result<GenerationClient, GenerationError> {
        let completion_provider = self
            .completion_provider
            .ok_or(GenerationError::MissingCompletionProvider)?;
        Ok(GenerationClient {
            completion_provider,
        })
    }
}
