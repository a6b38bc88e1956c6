//! # Chunk Merger
//!
//! Combines all accepted chunks into the final merged blob. Merging is
//! best-effort by contract: a generation that reached this stage always
//! produces output, falling back to a plain stringify if pretty-printing
//! fails.

use crate::types::{ChunkData, GenerationOutput, OutputFormat};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Merges all retained chunks into one value in the target format.
pub fn merge_chunks(chunks: &[ChunkData], format: OutputFormat) -> GenerationOutput {
    let chunk_count = chunks.len();
    let (data, record_count) = match format {
        OutputFormat::Json => merge_json(chunks),
        OutputFormat::Csv => merge_csv(chunks),
        OutputFormat::Text => merge_text(chunks),
    };
    GenerationOutput {
        data,
        format,
        chunk_count,
        record_count,
    }
}

/// Flattens every chunk's records into one array, pretty-printed.
fn merge_json(chunks: &[ChunkData]) -> (String, usize) {
    let records: Vec<Value> = chunks
        .iter()
        .flat_map(|chunk| match chunk {
            ChunkData::Records(records) => records.clone(),
            other => {
                warn!(?other, "Skipping non-JSON chunk during merge");
                Vec::new()
            }
        })
        .collect();

    let record_count = records.len();
    let data = match serde_json::to_string_pretty(&records) {
        Ok(pretty) => pretty,
        Err(e) => {
            // Degraded output beats a failed request here.
            warn!("Pretty-printing merged records failed, falling back: {e}");
            Value::Array(records).to_string()
        }
    };
    (data, record_count)
}

/// Unions all data lines under the first chunk's header.
///
/// Each subsequent chunk's own header line is discarded, and data lines are
/// deduplicated with set semantics while preserving first-seen order.
fn merge_csv(chunks: &[ChunkData]) -> (String, usize) {
    let mut tables = chunks.iter().filter_map(|chunk| match chunk {
        ChunkData::Table(table) => Some(table.as_str()),
        other => {
            warn!(?other, "Skipping non-CSV chunk during merge");
            None
        }
    });

    let Some(first) = tables.next() else {
        return (String::new(), 0);
    };

    let mut lines = first.lines();
    let header = lines.next().unwrap_or("");

    let mut seen = HashSet::new();
    let mut data_lines: Vec<&str> = Vec::new();
    for line in lines.chain(tables.flat_map(|table| table.lines().skip(1))) {
        if seen.insert(line) {
            data_lines.push(line);
        }
    }

    let record_count = data_lines.len();
    let mut merged = vec![header];
    merged.extend(data_lines);
    (merged.join("\n"), record_count)
}

/// Joins text chunks with a blank line separator.
fn merge_text(chunks: &[ChunkData]) -> (String, usize) {
    let texts: Vec<&str> = chunks
        .iter()
        .filter_map(|chunk| match chunk {
            ChunkData::Text(text) => Some(text.as_str()),
            other => {
                warn!(?other, "Skipping non-text chunk during merge");
                None
            }
        })
        .collect();

    let record_count = texts.len();
    (texts.join("\n\n"), record_count)
}
