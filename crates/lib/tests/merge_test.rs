//! # Merge Tests
//!
//! Covers the chunk merger: JSON flatten-and-pretty-print, CSV
//! header-preserving line union, and text joining.

use serde_json::json;
use synthgen::merge::merge_chunks;
use synthgen::{ChunkData, OutputFormat};

#[test]
fn test_json_merge_flattens_all_chunks() {
    let chunks = vec![
        ChunkData::Records(vec![json!({"id": 1}), json!({"id": 2})]),
        ChunkData::Records(vec![json!({"id": 3})]),
    ];

    let output = merge_chunks(&chunks, OutputFormat::Json);
    assert_eq!(output.chunk_count, 2);
    assert_eq!(output.record_count, 3);

    let parsed: Vec<serde_json::Value> = serde_json::from_str(&output.data).unwrap();
    assert_eq!(
        parsed,
        vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]
    );
    // Pretty-printed, not a single line.
    assert!(output.data.contains('\n'));
}

#[test]
fn test_csv_merge_keeps_first_header_and_unions_data_lines() {
    let chunks = vec![
        ChunkData::Table("h1,h2\nv1,v2".to_string()),
        ChunkData::Table("h1,h2\nv1,v2\nv3,v4".to_string()),
    ];

    let output = merge_chunks(&chunks, OutputFormat::Csv);
    assert_eq!(output.data, "h1,h2\nv1,v2\nv3,v4");
    assert_eq!(output.chunk_count, 2);
    assert_eq!(output.record_count, 2);
}

#[test]
fn test_csv_merge_discards_subsequent_headers() {
    let chunks = vec![
        ChunkData::Table("name,age\nalice,30".to_string()),
        ChunkData::Table("name,age\nbob,25".to_string()),
    ];

    let output = merge_chunks(&chunks, OutputFormat::Csv);
    assert_eq!(output.data, "name,age\nalice,30\nbob,25");
}

#[test]
fn test_csv_merge_of_no_chunks_is_empty() {
    let output = merge_chunks(&[], OutputFormat::Csv);
    assert_eq!(output.data, "");
    assert_eq!(output.chunk_count, 0);
    assert_eq!(output.record_count, 0);
}

#[test]
fn test_text_merge_joins_with_blank_lines() {
    let chunks = vec![
        ChunkData::Text("First paragraph.".to_string()),
        ChunkData::Text("Second paragraph.".to_string()),
    ];

    let output = merge_chunks(&chunks, OutputFormat::Text);
    assert_eq!(output.data, "First paragraph.\n\nSecond paragraph.");
    assert_eq!(output.record_count, 2);
}
