//! # Output Extractor
//!
//! Converts raw model text into the declared format's value, tolerating the
//! formatting mistakes LLMs commonly make: prose around the payload, markdown
//! fences, trailing commas, unquoted object keys, and single-quoted strings.
//!
//! This module is a pure parser: no side effects, and every failure is a
//! typed [`GenerationError::Extraction`].

use crate::{
    errors::GenerationError,
    types::{ChunkData, OutputFormat},
};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Extracts a format-typed chunk value from raw model output.
///
/// A successfully-parsed-but-empty JSON array or object is treated as an
/// extraction failure: empty output is not useful data and must not be
/// accepted as a chunk.
pub fn extract(content: &str, format: OutputFormat) -> Result<ChunkData, GenerationError> {
    match format {
        OutputFormat::Json => extract_json(content).map(ChunkData::Records),
        OutputFormat::Csv => extract_csv(content).map(ChunkData::Table),
        OutputFormat::Text => Ok(ChunkData::Text(content.trim().to_string())),
    }
}

/// Extracts a sequence of JSON records, attempting a direct parse before
/// falling back to partial recovery.
fn extract_json(content: &str) -> Result<Vec<Value>, GenerationError> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        if let Some(records) = into_records(value) {
            if !records.is_empty() {
                return Ok(records);
            }
        }
    }

    let records = recover_partial_json(content)?;
    if records.is_empty() {
        debug!("Failed to extract valid JSON data from model output");
        return Err(GenerationError::Extraction(OutputFormat::Json));
    }
    Ok(records)
}

/// Normalizes a parsed value into a record sequence.
///
/// Arrays contribute their elements, a lone non-empty object becomes a
/// single-record sequence, and everything else is rejected: a bare scalar or
/// an empty `{}` is not a usable dataset.
fn into_records(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(ref map) if map.is_empty() => None,
        Value::Object(_) => Some(vec![value]),
        _ => None,
    }
}

/// Attempts to recover records from malformed model output.
///
/// Candidates are tried in order: a fenced ```json block, any fenced block,
/// the first bracket-delimited array substring, then the first
/// brace-delimited object substring. Each candidate is parsed as-is and then
/// again after repair. If no candidate yields records, individual object and
/// array fragments are swept up across the whole content.
fn recover_partial_json(content: &str) -> Result<Vec<Value>, GenerationError> {
    let fenced_json = Regex::new(r"(?s)```json\s*(.*?)\s*```")?;
    let fenced_any = Regex::new(r"(?s)```\s*(.*?)\s*```")?;
    let array_fragment = Regex::new(r"\[[^\[\]]*\]")?;
    let object_fragment = Regex::new(r"\{[^{}]*\}")?;

    let mut candidates: Vec<&str> = Vec::new();
    if let Some(caps) = fenced_json.captures(content) {
        candidates.push(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = fenced_any.captures(content) {
        candidates.push(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(m) = array_fragment.find(content) {
        candidates.push(m.as_str());
    }
    if let Some(m) = object_fragment.find(content) {
        candidates.push(m.as_str());
    }

    for candidate in candidates {
        if let Some(records) = parse_candidate(candidate)? {
            if !records.is_empty() {
                return Ok(records);
            }
        }
    }

    // Last resort: collect every parseable object or array fragment.
    let mut recovered = Vec::new();
    for m in object_fragment.find_iter(content) {
        if let Some(records) = parse_candidate(m.as_str())? {
            recovered.extend(records);
        }
    }
    if recovered.is_empty() {
        for m in array_fragment.find_iter(content) {
            if let Some(records) = parse_candidate(m.as_str())? {
                recovered.extend(records);
            }
        }
    }
    Ok(recovered)
}

/// Parses one candidate substring, retrying with repairs on failure.
fn parse_candidate(candidate: &str) -> Result<Option<Vec<Value>>, GenerationError> {
    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return Ok(into_records(value));
    }
    let repaired = repair_json(candidate)?;
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        return Ok(into_records(value));
    }
    Ok(None)
}

/// Repairs common LLM JSON malformations: trailing commas before closing
/// brackets, bare (unquoted) object keys, and single-quoted strings.
fn repair_json(candidate: &str) -> Result<String, GenerationError> {
    let trailing_commas = Regex::new(r",\s*([}\]])")?;
    let bare_keys = Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:")?;
    let single_quoted = Regex::new(r"'([^']*)'")?;

    let repaired = trailing_commas.replace_all(candidate, "${1}");
    let repaired = bare_keys.replace_all(&repaired, "${1}\"${2}\":");
    let repaired = single_quoted.replace_all(&repaired, "\"${1}\"");
    Ok(repaired.into_owned())
}

/// Extracts a CSV blob from a fenced ```csv block, or from the leading
/// unfenced run of the content. The result must contain at least one comma
/// and one newline to count as tabular data.
fn extract_csv(content: &str) -> Result<String, GenerationError> {
    let fenced_csv = Regex::new(r"(?s)```csv\s*\n(.*?)\n\s*```")?;
    let block = match fenced_csv.captures(content) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        // Fall back to everything before the first backtick.
        None => content.split('`').next().unwrap_or(""),
    };

    let block = block.trim();
    if block.contains(',') && block.contains('\n') {
        Ok(block.to_string())
    } else {
        debug!("Failed to extract valid CSV data from model output");
        Err(GenerationError::Extraction(OutputFormat::Csv))
    }
}
