//! # Similarity Filter Tests
//!
//! Covers the format-aware near-duplicate filtering: field-overlap ratio for
//! JSON records, exact line membership for CSV, and normalized edit distance
//! for free text.

use serde_json::json;
use synthgen::similarity::{filter_chunk, string_similarity};
use synthgen::ChunkData;

#[test]
fn test_identical_records_are_dropped() {
    let previous = vec![ChunkData::Records(vec![json!({"a": 1, "b": 2})])];
    let new_chunk = ChunkData::Records(vec![json!({"a": 1, "b": 2}), json!({"a": 9, "b": 9})]);

    let filtered = filter_chunk(new_chunk, &previous);
    assert_eq!(filtered, ChunkData::Records(vec![json!({"a": 9, "b": 9})]));
}

#[test]
fn test_half_overlap_is_below_threshold() {
    // Ratio 0.5 is not strictly greater than 0.6, so the record survives.
    let previous = vec![ChunkData::Records(vec![json!({"a": 1, "b": 2})])];
    let new_chunk = ChunkData::Records(vec![json!({"a": 1, "b": 9})]);

    let filtered = filter_chunk(new_chunk.clone(), &previous);
    assert_eq!(filtered, new_chunk);
}

#[test]
fn test_overlap_denominator_uses_larger_key_set() {
    // Two of two keys match, but the prior record has five keys: 2/5 < 0.6.
    let previous = vec![ChunkData::Records(vec![
        json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}),
    ])];
    let new_chunk = ChunkData::Records(vec![json!({"a": 1, "b": 2})]);

    let filtered = filter_chunk(new_chunk.clone(), &previous);
    assert_eq!(filtered, new_chunk);
}

#[test]
fn test_non_object_records_compare_by_equality() {
    let previous = vec![ChunkData::Records(vec![json!("alpha"), json!(3)])];
    let new_chunk = ChunkData::Records(vec![json!("alpha"), json!("beta"), json!(3)]);

    let filtered = filter_chunk(new_chunk, &previous);
    assert_eq!(filtered, ChunkData::Records(vec![json!("beta")]));
}

#[test]
fn test_records_compared_against_all_prior_chunks() {
    let previous = vec![
        ChunkData::Records(vec![json!({"id": 1})]),
        ChunkData::Records(vec![json!({"id": 2})]),
    ];
    let new_chunk = ChunkData::Records(vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);

    let filtered = filter_chunk(new_chunk, &previous);
    assert_eq!(filtered, ChunkData::Records(vec![json!({"id": 3})]));
}

#[test]
fn test_csv_header_is_always_retained() {
    let previous = vec![ChunkData::Table("h1,h2\nv1,v2".to_string())];
    let new_chunk = ChunkData::Table("h1,h2\nv1,v2\nv3,v4".to_string());

    let filtered = filter_chunk(new_chunk, &previous);
    // The duplicated data line is dropped, the header is kept even though it
    // also appears in the prior chunk.
    assert_eq!(filtered, ChunkData::Table("h1,h2\nv3,v4".to_string()));
}

#[test]
fn test_text_near_duplicate_sentences_are_dropped() {
    let previous = vec![ChunkData::Text(
        "The quick brown fox jumps over the lazy dog. Weather today is sunny".to_string(),
    )];
    let new_chunk = ChunkData::Text(
        "The quick brown fox jumps over the lazy cat. Completely unrelated facts about databases"
            .to_string(),
    );

    let filtered = filter_chunk(new_chunk, &previous);
    assert_eq!(
        filtered,
        ChunkData::Text("Completely unrelated facts about databases".to_string())
    );
}

#[test]
fn test_text_filtering_handles_lowercase_expanding_chars() {
    // 'İ' lowercases to two chars, so the edit distance can exceed the
    // original char count; filtering must still score it in range and keep
    // the dissimilar sentences.
    let previous = vec![ChunkData::Text("a. Weather today is sunny".to_string())];
    let new_chunk = ChunkData::Text("İ. Completely unrelated facts about databases".to_string());

    let filtered = filter_chunk(new_chunk.clone(), &previous);
    assert_eq!(filtered, new_chunk);
}

#[test]
fn test_mismatched_prior_chunk_variants_are_skipped() {
    // A prior chunk of another format contributes nothing to the pool; the
    // new chunk passes through unfiltered instead of failing.
    let previous = vec![ChunkData::Text("some earlier prose".to_string())];
    let new_chunk = ChunkData::Records(vec![json!({"id": 1})]);

    let filtered = filter_chunk(new_chunk.clone(), &previous);
    assert_eq!(filtered, new_chunk);

    let previous = vec![ChunkData::Records(vec![json!({"id": 1})])];
    let new_chunk = ChunkData::Text("fresh text".to_string());

    let filtered = filter_chunk(new_chunk.clone(), &previous);
    assert_eq!(filtered, new_chunk);
}

#[test]
fn test_string_similarity_is_case_insensitive() {
    assert_eq!(string_similarity("Hello World", "hello world"), 1.0);
    assert!(string_similarity("hello world", "hello worlds") > 0.9);
}
