#![cfg(feature = "json")]
//! Integration tests for JSON encoding and decoding of sets.

use rstest::rstest;
use setalg::json::{self, DecodeMode};
use setalg::{DecodeError, ThreadSafeSet, ThreadUnsafeSet};

// =============================================================================
// Encoding
// =============================================================================

#[rstest]
fn test_marshal_produces_an_array_of_elements() {
    let set = ThreadUnsafeSet::from([1, 2, 3]);
    let bytes = set.marshal_json().unwrap();

    let mut decoded: Vec<i32> = serde_json::from_slice(&bytes).unwrap();
    decoded.sort_unstable();
    assert_eq!(decoded, vec![1, 2, 3]);
}

#[rstest]
fn test_empty_set_encodes_as_empty_array() {
    let set = ThreadSafeSet::<String>::new();
    assert_eq!(set.marshal_json().unwrap(), b"[]");
    assert_eq!(json::to_json(&set).unwrap(), "[]");
}

// =============================================================================
// Round Trips
// =============================================================================

#[rstest]
fn test_unsafe_round_trip() {
    let original = ThreadUnsafeSet::from(["apple", "banana", "pear"].map(String::from));
    let bytes = original.marshal_json().unwrap();

    let mut decoded = ThreadUnsafeSet::<String>::new();
    decoded.unmarshal_json(&bytes, DecodeMode::Lenient).unwrap();
    assert_eq!(decoded, original);
}

#[rstest]
fn test_safe_round_trip_through_serde() {
    let original: ThreadSafeSet<i64> = (-5..5).collect();
    let text = serde_json::to_string(&original).unwrap();

    let decoded: ThreadSafeSet<i64> = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, original);
}

#[rstest]
fn test_serde_deserialize_collapses_duplicates() {
    let decoded: ThreadUnsafeSet<u8> = serde_json::from_str("[1, 1, 2]").unwrap();
    assert_eq!(decoded, ThreadUnsafeSet::from([1, 2]));
}

#[rstest]
fn test_serde_deserialize_is_strict() {
    let result = serde_json::from_str::<ThreadUnsafeSet<u8>>(r#"[1, "two"]"#);
    assert!(result.is_err());
}

// =============================================================================
// Lenient and Strict Decoding
// =============================================================================

#[rstest]
fn test_lenient_decode_skips_wrong_typed_items() {
    let set = ThreadSafeSet::<i32>::new();
    set.unmarshal_json(br#"[1, "x", 2, {"k": 3}, 2]"#, DecodeMode::default())
        .unwrap();
    assert_eq!(set, ThreadSafeSet::from([1, 2]));
}

#[rstest]
fn test_strict_decode_keeps_items_before_the_failure() {
    let mut set = ThreadUnsafeSet::<i32>::new();
    let error = set
        .unmarshal_json(br#"[1, 2, true, 4]"#, DecodeMode::Strict)
        .unwrap_err();

    assert!(matches!(error, DecodeError::Element { index: 2, .. }));
    assert_eq!(set, ThreadUnsafeSet::from([1, 2]));
}

#[rstest]
fn test_decode_adds_to_existing_elements() {
    let mut set = ThreadUnsafeSet::from([10]);
    set.unmarshal_json(b"[20, 30]", DecodeMode::Lenient).unwrap();
    assert_eq!(set, ThreadUnsafeSet::from([10, 20, 30]));
}

#[rstest]
#[case(DecodeMode::Lenient)]
#[case(DecodeMode::Strict)]
fn test_malformed_input_leaves_set_unchanged(#[case] mode: DecodeMode) {
    let set = ThreadSafeSet::from([1]);
    let error = set.unmarshal_json(b"[1, 2", mode).unwrap_err();

    assert!(matches!(error, DecodeError::Syntax(_)));
    assert!(error.to_string().starts_with("malformed set JSON"));
    assert_eq!(set, ThreadSafeSet::from([1]));
}

#[rstest]
fn test_non_array_is_rejected() {
    let mut set = ThreadUnsafeSet::<i32>::new();
    let error = set
        .unmarshal_json(br#"{"a": 1}"#, DecodeMode::Lenient)
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "expected a JSON array for a set, found object"
    );
    assert!(set.is_empty());
}
