//! # Similarity Filter
//!
//! Drops near-duplicate entries from a newly extracted chunk relative to all
//! previously accepted chunks. Similarity is format-aware: field-overlap
//! ratio for JSON records, exact line membership for CSV, and normalized
//! edit distance for free text.
//!
//! Filtering only ever looks backwards. The prior pool is exactly the chunks
//! accepted strictly before the current index, so a given chunk sequence
//! always filters the same way.

use crate::types::ChunkData;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Two entries with a similarity score strictly above this are near-duplicates.
const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Removes entries from `new_chunk` that are too similar to any entry in
/// `previous_chunks`.
///
/// This never fails: chunks of a mismatched format in the prior pool are
/// logged and skipped rather than aborting, since a complete merge matters
/// more than perfect dedup.
pub fn filter_chunk(new_chunk: ChunkData, previous_chunks: &[ChunkData]) -> ChunkData {
    match new_chunk {
        ChunkData::Records(records) => {
            ChunkData::Records(filter_records(records, previous_chunks))
        }
        ChunkData::Table(table) => ChunkData::Table(filter_lines(&table, previous_chunks)),
        ChunkData::Text(text) => ChunkData::Text(filter_sentences(&text, previous_chunks)),
    }
}

/// Keeps only the new records that are not similar to any prior record.
///
/// Each new record is judged independently against the full prior pool; this
/// is deliberately not a symmetric or global dedup.
fn filter_records(new_records: Vec<Value>, previous_chunks: &[ChunkData]) -> Vec<Value> {
    let previous_records: Vec<&Value> = previous_chunks
        .iter()
        .flat_map(|chunk| match chunk {
            ChunkData::Records(records) => records.iter().collect::<Vec<_>>(),
            other => {
                warn!(?other, "Skipping non-JSON chunk while filtering records");
                Vec::new()
            }
        })
        .collect();

    new_records
        .into_iter()
        .filter(|new_record| {
            !previous_records
                .iter()
                .any(|previous| records_similar(new_record, previous))
        })
        .collect()
}

/// Field-overlap similarity for a pair of records.
///
/// For two objects the score is the count of keys of `a` whose values match
/// in `b`, divided by `max(|keys(a)|, |keys(b)|)`. The asymmetric numerator
/// over a symmetric denominator is preserved exactly from the original
/// heuristic. Non-object values compare by strict equality.
fn records_similar(a: &Value, b: &Value) -> bool {
    match (a.as_object(), b.as_object()) {
        (Some(a_map), Some(b_map)) => {
            let denominator = a_map.len().max(b_map.len());
            if denominator == 0 {
                return false;
            }
            let matching = a_map
                .iter()
                .filter(|(key, value)| b_map.get(*key) == Some(value))
                .count();
            (matching as f64 / denominator as f64) > SIMILARITY_THRESHOLD
        }
        _ => a == b,
    }
}

/// Drops non-header CSV lines that exactly match any prior line.
///
/// The first line of the new chunk is its header and is always retained.
fn filter_lines(new_table: &str, previous_chunks: &[ChunkData]) -> String {
    let previous_lines: HashSet<&str> = previous_chunks
        .iter()
        .flat_map(|chunk| match chunk {
            ChunkData::Table(table) => table.lines().collect::<Vec<_>>(),
            other => {
                warn!(?other, "Skipping non-CSV chunk while filtering lines");
                Vec::new()
            }
        })
        .collect();

    let header = new_table.lines().next().unwrap_or("");
    new_table
        .lines()
        .filter(|line| *line == header || !previous_lines.contains(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops sentences whose normalized edit-distance similarity to any prior
/// sentence exceeds the threshold.
fn filter_sentences(new_text: &str, previous_chunks: &[ChunkData]) -> String {
    let previous_sentences: Vec<&str> = previous_chunks
        .iter()
        .flat_map(|chunk| match chunk {
            ChunkData::Text(text) => text.split(". ").collect::<Vec<_>>(),
            other => {
                warn!(?other, "Skipping non-text chunk while filtering sentences");
                Vec::new()
            }
        })
        .collect();

    new_text
        .split(". ")
        .filter(|sentence| {
            !previous_sentences
                .iter()
                .any(|previous| string_similarity(sentence, previous) > SIMILARITY_THRESHOLD)
        })
        .collect::<Vec<_>>()
        .join(". ")
}

/// Normalized Levenshtein similarity in `[0, 1]`, case-insensitive.
///
/// Both inputs are lowercased once here, and the normalizing length is taken
/// from those same lowercased forms. Lowercasing can change a string's char
/// count ('İ' expands to two chars), so measuring the original strings would
/// let the distance exceed the length.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let longer_len = a_len.max(b_len);
    if longer_len == 0 {
        return 1.0;
    }
    (longer_len - edit_distance(&a, &b)) as f64 / longer_len as f64
}

/// Levenshtein distance using a single rolling cost row.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut costs: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = costs[0];
        costs[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = costs[j + 1];
            costs[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(costs[j])
            };
            diagonal = above;
        }
    }
    costs[b.len()]
}
