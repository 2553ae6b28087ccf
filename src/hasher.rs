//! Hash builder selection.
//!
//! Both set variants are generic over a [`BuildHasher`](std::hash::BuildHasher)
//! parameter that defaults to [`DefaultHashBuilder`]. Which hasher that is
//! depends on the enabled cargo features:
//!
//! | Feature  | `DefaultHashBuilder`          |
//! |----------|-------------------------------|
//! | `fxhash` | `rustc_hash::FxBuildHasher`   |
//! | `ahash`  | `ahash::RandomState`          |
//! | neither  | `std::hash::RandomState`      |
//!
//! `fxhash` wins when both features are enabled.

/// Hash builder used when a set is created without an explicit one.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hash builder used when a set is created without an explicit one.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hash builder used when a set is created without an explicit one.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::hash::RandomState;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::hash::BuildHasher;

    #[rstest]
    fn test_default_hash_builder_is_deterministic_per_instance() {
        let builder = DefaultHashBuilder::default();
        assert_eq!(builder.hash_one("apple"), builder.hash_one("apple"));
    }
}
