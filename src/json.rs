//! JSON encoding and decoding of sets.
//!
//! A set is encoded as a JSON array of its elements in unspecified order.
//! Decoding accepts any JSON array. What happens to an item that does not
//! decode as the element type depends on the [`DecodeMode`]:
//!
//! | Mode                  | Mismatched item                          |
//! |-----------------------|------------------------------------------|
//! | [`DecodeMode::Lenient`] | skipped, decoding continues            |
//! | [`DecodeMode::Strict`]  | decoding stops with [`DecodeError::Element`] |
//!
//! Malformed JSON and a non-array top level are errors in both modes. Items
//! added before an error stay in the target set.
//!
//! # Examples
//!
//! ```rust
//! use setalg::ThreadUnsafeSet;
//! use setalg::json::DecodeMode;
//!
//! let mut set = ThreadUnsafeSet::<i32>::new();
//! set.unmarshal_json(br#"[1, "two", 3]"#, DecodeMode::Lenient).unwrap();
//! assert_eq!(set, ThreadUnsafeSet::from([1, 3]));
//!
//! let mut strict = ThreadUnsafeSet::<i32>::new();
//! assert!(strict.unmarshal_json(br#"[1, "two", 3]"#, DecodeMode::Strict).is_err());
//! assert_eq!(strict, ThreadUnsafeSet::from([1]));
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::DecodeError;

/// How decoding treats array items that do not match the element type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DecodeMode {
    /// Skip mismatched items.
    #[default]
    Lenient,
    /// Fail on the first mismatched item.
    Strict,
}

/// Encodes `set` as a JSON array.
///
/// # Errors
///
/// Fails if an element cannot be represented as JSON (for example a map with
/// non-string keys).
pub fn to_json<X: Serialize + ?Sized>(set: &X) -> Result<String, serde_json::Error> {
    serde_json::to_string(set)
}

pub(crate) fn encode<X: Serialize + ?Sized>(set: &X) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(set)
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses `bytes` as a JSON array and passes every item that decodes as `T`
/// to `insert`, in array order.
///
/// # Errors
///
/// - [`DecodeError::Syntax`] if `bytes` is not valid JSON.
/// - [`DecodeError::NotAnArray`] if the top-level value is not an array.
/// - [`DecodeError::Element`] in [`DecodeMode::Strict`] for the first item
///   that does not decode as `T`. Earlier items have already been inserted.
pub fn decode_into<T: DeserializeOwned>(
    bytes: &[u8],
    mode: DecodeMode,
    mut insert: impl FnMut(T),
) -> Result<(), DecodeError> {
    let items = match serde_json::from_slice::<Value>(bytes).map_err(DecodeError::Syntax)? {
        Value::Array(items) => items,
        other => {
            return Err(DecodeError::NotAnArray {
                found: kind_of(&other),
            });
        }
    };

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(element) => insert(element),
            Err(source) => match mode {
                DecodeMode::Lenient => {
                    debug!(index, error = %source, "skipping set item of the wrong type");
                }
                DecodeMode::Strict => return Err(DecodeError::Element { index, source }),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode(bytes: &str, mode: DecodeMode) -> (Vec<i64>, Result<(), DecodeError>) {
        let mut collected = Vec::new();
        let result = decode_into(bytes.as_bytes(), mode, |element| collected.push(element));
        (collected, result)
    }

    #[rstest]
    fn test_default_mode_is_lenient() {
        assert_eq!(DecodeMode::default(), DecodeMode::Lenient);
    }

    #[rstest]
    #[case(DecodeMode::Lenient)]
    #[case(DecodeMode::Strict)]
    fn test_well_typed_array_decodes_in_order(#[case] mode: DecodeMode) {
        let (collected, result) = decode("[3, 1, 2]", mode);
        assert!(result.is_ok());
        assert_eq!(collected, vec![3, 1, 2]);
    }

    #[rstest]
    fn test_lenient_skips_mismatched_items() {
        let (collected, result) = decode(r#"[1, "x", null, 4.5, 5]"#, DecodeMode::Lenient);
        assert!(result.is_ok());
        assert_eq!(collected, vec![1, 5]);
    }

    #[rstest]
    fn test_strict_reports_index_and_keeps_prefix() {
        let (collected, result) = decode(r#"[1, 2, "x", 4]"#, DecodeMode::Strict);
        assert!(matches!(result, Err(DecodeError::Element { index: 2, .. })));
        assert_eq!(collected, vec![1, 2]);
    }

    #[rstest]
    #[case("{\"a\": 1}", "object")]
    #[case("\"text\"", "string")]
    #[case("7", "number")]
    #[case("null", "null")]
    fn test_non_array_top_level(#[case] input: &str, #[case] kind: &str) {
        let (collected, result) = decode(input, DecodeMode::Lenient);
        match result {
            Err(DecodeError::NotAnArray { found }) => assert_eq!(found, kind),
            other => panic!("expected NotAnArray, got {other:?}"),
        }
        assert!(collected.is_empty());
    }

    #[rstest]
    #[case("[1, 2")]
    #[case("")]
    #[case("not json")]
    fn test_malformed_input_is_a_syntax_error(#[case] input: &str) {
        let (_, result) = decode(input, DecodeMode::Lenient);
        assert!(matches!(result, Err(DecodeError::Syntax(_))));
    }

    #[rstest]
    fn test_to_json_emits_an_array() {
        let json = to_json(&vec![1, 2]).unwrap();
        assert_eq!(json, "[1,2]");
    }
}
