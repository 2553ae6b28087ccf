//! Error types and failure helpers.
//!
//! Two kinds of failure exist in this crate:
//!
//! - **Type mismatch**: a binary operation on the dynamic [`Set`](crate::set::Set)
//!   contract received an operand of a different concrete variant. This is a
//!   programming error and panics through [`type_mismatch`].
//! - **Decode failure**: JSON input could not be turned into a set. This is
//!   returned to the caller as a [`DecodeError`].

#[cfg(feature = "json")]
use std::fmt;

/// Aborts the current call because two set operands do not share a variant.
///
/// # Panics
///
/// Always.
#[cold]
#[track_caller]
pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> ! {
    panic!("set type mismatch: expected an operand of type {expected}, found {found}")
}

/// Error returned when JSON input cannot be decoded into a set.
///
/// Elements inserted before the failure remain in the target set.
#[cfg(feature = "json")]
#[derive(Debug)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    Syntax(serde_json::Error),
    /// The input is valid JSON but its top level is not an array.
    NotAnArray {
        /// The JSON kind found instead (`"object"`, `"string"`, ...).
        found: &'static str,
    },
    /// An array item did not decode as the element type (strict mode only).
    Element {
        /// Position of the offending item in the input array.
        index: usize,
        /// The underlying decode failure.
        source: serde_json::Error,
    },
}

#[cfg(feature = "json")]
impl fmt::Display for DecodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(error) => write!(formatter, "malformed set JSON: {error}"),
            Self::NotAnArray { found } => {
                write!(formatter, "expected a JSON array for a set, found {found}")
            }
            Self::Element { index, source } => {
                write!(formatter, "set item {index} has the wrong type: {source}")
            }
        }
    }
}

#[cfg(feature = "json")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(error) | Self::Element { source: error, .. } => Some(error),
            Self::NotAnArray { .. } => None,
        }
    }
}
