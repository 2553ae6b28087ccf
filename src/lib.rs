//! # setalg
//!
//! Generic mathematical sets for Rust with a thread-safe and a thread-unsafe
//! variant sharing one algebra.
//!
//! ## Overview
//!
//! - **Set algebra**: union, intersection, difference, symmetric difference,
//!   subset and superset relations, Cartesian product and power set.
//! - **Two variants**: [`ThreadUnsafeSet`] for single-threaded use and
//!   [`ThreadSafeSet`], which guards the same core with a reader/writer lock.
//! - **Cancellable iteration**: [`SetIterator`] streams elements from a
//!   background producer and can be stopped at any point.
//! - **Dynamic dispatch**: the [`Set`] trait and the [`new_set`] factories
//!   pick the variant at run time.
//! - **Serialization**: serde support and a JSON adapter with lenient and
//!   strict decoding.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both variants
//! - `json`: the [`json`] module and `marshal_json`/`unmarshal_json` (enables `serde`)
//! - `fxhash`: use `rustc-hash` as the default hasher
//! - `ahash`: use `ahash` as the default hasher
//!
//! `serde` and `json` are enabled by default.
//!
//! ## Example
//!
//! ```rust
//! use setalg::prelude::*;
//!
//! let set_a = ThreadSafeSet::from([1, 2, 3]);
//! let set_b = ThreadSafeSet::from([2, 3, 4]);
//!
//! assert_eq!(set_a.intersect(&set_b), ThreadSafeSet::from([2, 3]));
//! assert_eq!(set_a.union(&set_b).cardinality(), 4);
//!
//! let fruits = ThreadUnsafeSet::from(["apple", "banana", "pear"]);
//! assert!(fruits.contains(&["apple", "pear"]));
//! assert_eq!(sorted(&fruits), vec!["apple", "banana", "pear"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set types, the [`Set`] trait and the factories.
///
/// # Usage
///
/// ```rust
/// use setalg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::iterator::SetIterator;
    pub use crate::set::*;

    #[cfg(feature = "json")]
    pub use crate::json::DecodeMode;
}

pub mod error;
pub mod hasher;
pub mod iterator;
pub mod set;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "json")]
pub use error::DecodeError;
pub use hasher::DefaultHashBuilder;
pub use iterator::SetIterator;
pub use set::{
    Concurrency, Element, OrderedPair, PowerSet, Set, ThreadSafeSet, ThreadUnsafeSet, new_set,
    new_set_from_map_keys, new_set_from_pair_keys, new_set_from_pair_values,
    new_set_with_capacity, sorted,
};
