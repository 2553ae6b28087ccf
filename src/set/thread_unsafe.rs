//! Hash-backed set with no internal locking.
//!
//! [`ThreadUnsafeSet`] is the reference implementation of the set algebra.
//! [`ThreadSafeSet`](crate::ThreadSafeSet) wraps it behind a lock and
//! delegates every operation to it.
//!
//! # Examples
//!
//! ```rust
//! use setalg::ThreadUnsafeSet;
//!
//! let set_a = ThreadUnsafeSet::from([1, 2, 3]);
//! let set_b = ThreadUnsafeSet::from([2, 3, 4]);
//!
//! assert_eq!(set_a.intersect(&set_b), ThreadUnsafeSet::from([2, 3]));
//! assert_eq!(set_a.union(&set_b), ThreadUnsafeSet::from([1, 2, 3, 4]));
//! assert_eq!(set_a.difference(&set_b), ThreadUnsafeSet::from([1]));
//! assert_eq!(set_a.symmetric_difference(&set_b), ThreadUnsafeSet::from([1, 4]));
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crossbeam_channel::Receiver;

use super::{OrderedPair, PowerSet};
use crate::hasher::DefaultHashBuilder;
use crate::iterator::{self, SetIterator};

/// An unordered set of unique elements without any concurrency control.
///
/// Mutation goes through `&mut self`, so sharing one instance between threads
/// requires external synchronization. Use [`ThreadSafeSet`](crate::ThreadSafeSet)
/// for a set that can be mutated through a shared reference.
///
/// # Time Complexity
///
/// | Operation              | Complexity          |
/// |------------------------|---------------------|
/// | `add` / `remove`       | O(1) average        |
/// | `contains`             | O(k) for k values   |
/// | `union`                | O(n + m)            |
/// | `intersect`            | O(min(n, m))        |
/// | `difference`           | O(n)                |
/// | `symmetric_difference` | O(n + m)            |
/// | `is_subset`            | O(n)                |
/// | `cartesian_product`    | O(n * m)            |
/// | `power_set`            | O(2^n * n)          |
#[derive(Clone)]
pub struct ThreadUnsafeSet<T, S = DefaultHashBuilder> {
    items: HashSet<T, S>,
}

impl<T, S> ThreadUnsafeSet<T, S> {
    /// Returns the number of elements in the set.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the elements by reference in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> ThreadUnsafeSet<T, DefaultHashBuilder> {
    /// Creates an empty set using the [`DefaultHashBuilder`].
    ///
    /// Use [`with_hasher`](Self::with_hasher) for another hash builder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> ThreadUnsafeSet<T, S> {
    /// Creates an empty set that hashes with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            items: HashSet::with_hasher(hasher),
        }
    }

    /// Creates an empty set with room for `capacity` elements that hashes
    /// with `hasher`.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            items: HashSet::with_capacity_and_hasher(capacity, hasher),
        }
    }
}

impl<T, S> ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{

    /// Creates a set from the keys of a map.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use setalg::ThreadUnsafeSet;
    ///
    /// let ages = HashMap::from([("ada", 36), ("alan", 41)]);
    /// let names: ThreadUnsafeSet<&str> = ThreadUnsafeSet::from_map_keys(&ages);
    /// assert!(names.contains(&["ada", "alan"]));
    /// ```
    #[must_use]
    pub fn from_map_keys<'a, V, M>(map: M) -> Self
    where
        T: Clone + 'a,
        V: 'a,
        M: IntoIterator<Item = (&'a T, &'a V)>,
    {
        map.into_iter().map(|(key, _)| key.clone()).collect()
    }

    /// Creates a set from the keys of a sequence of key/value pairs.
    #[must_use]
    pub fn from_pair_keys<V>(pairs: impl IntoIterator<Item = (T, V)>) -> Self {
        pairs.into_iter().map(|(key, _)| key).collect()
    }

    /// Creates a set from the values of a sequence of key/value pairs.
    #[must_use]
    pub fn from_pair_values<K>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
        pairs.into_iter().map(|(_, value)| value).collect()
    }

    /// Adds `value`, returning `true` if it was not already present.
    pub fn add(&mut self, value: T) -> bool {
        self.items.insert(value)
    }

    /// Adds every value, returning how many of them were new.
    pub fn append(&mut self, values: impl IntoIterator<Item = T>) -> usize {
        let mut added = 0;
        for value in values {
            if self.items.insert(value) {
                added += 1;
            }
        }
        added
    }

    /// Removes `value` if present.
    pub fn remove<Q>(&mut self, value: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.remove(value);
    }

    /// Removes every value that is present.
    pub fn remove_all<'a, Q>(&mut self, values: impl IntoIterator<Item = &'a Q>)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        for value in values {
            self.items.remove(value);
        }
    }

    /// Empties the set, releasing its storage.
    pub fn clear(&mut self) {
        self.items = HashSet::with_hasher(S::default());
    }

    /// Returns `true` if every value is present. An empty list is trivially
    /// contained.
    pub fn contains<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        values.into_iter().all(|value| self.items.contains(value))
    }

    /// Returns `true` if `value` is present.
    pub fn contains_one<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains(value)
    }

    /// Returns `true` if at least one value is present. An empty list is
    /// never contained.
    pub fn contains_any<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        values.into_iter().any(|value| self.items.contains(value))
    }

    /// Returns `true` if the two sets share at least one element.
    pub fn contains_any_element(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.cardinality() < other.cardinality() {
            (self, other)
        } else {
            (other, self)
        };
        smaller.iter().any(|element| larger.items.contains(element))
    }

    /// Returns `true` if both sets hold the same elements.
    pub fn equal(&self, other: &Self) -> bool {
        self.cardinality() == other.cardinality()
            && self.iter().all(|element| other.items.contains(element))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.cardinality() > other.cardinality() {
            return false;
        }
        self.iter().all(|element| other.items.contains(element))
    }

    /// Returns `true` if `self` is a subset of `other` and not equal to it.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && !self.equal(other)
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and not equal to it.
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        self.is_superset(other) && !self.equal(other)
    }

    /// Calls `callback` on every element until it returns `true`.
    pub fn each(&self, mut callback: impl FnMut(&T) -> bool) {
        for element in &self.items {
            if callback(element) {
                break;
            }
        }
    }

    /// Calls `yield_element` on every element while it returns `true`.
    pub fn elements(&self, mut yield_element: impl FnMut(&T) -> bool) {
        self.each(|element| !yield_element(element));
    }
}

impl<T, S> ThreadUnsafeSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Returns a new set with the elements of either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity_and_hasher(
            self.cardinality().max(other.cardinality()),
            S::default(),
        );
        result.items.extend(self.iter().cloned());
        result.items.extend(other.iter().cloned());
        result
    }

    /// Returns a new set with the elements present in both sets.
    ///
    /// Walks the smaller operand and probes the larger one.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (smaller, larger) = if self.cardinality() < other.cardinality() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .iter()
            .filter(|element| larger.items.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements of `self` absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.iter()
            .filter(|element| !other.items.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.difference(other);
        result.items.extend(
            other
                .iter()
                .filter(|element| !self.items.contains(*element))
                .cloned(),
        );
        result
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    pub fn pop(&mut self) -> Option<T> {
        let element = self.items.iter().next()?.clone();
        self.items.take(&element)
    }

    /// Copies the elements into a vector in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Returns the set of all ordered pairs `(a, b)` with `a` from `self` and
    /// `b` from `other`.
    #[must_use]
    pub fn cartesian_product(&self, other: &Self) -> ThreadUnsafeSet<OrderedPair<T>, S> {
        let mut product = ThreadUnsafeSet::with_capacity_and_hasher(
            self.cardinality().saturating_mul(other.cardinality()),
            S::default(),
        );
        for first in self {
            for second in other {
                product.add(OrderedPair::new(first.clone(), second.clone()));
            }
        }
        product
    }

    /// Returns every subset of `self`, including the empty set and `self`.
    ///
    /// Built incrementally: starting from `{∅}`, each element `e` adds a copy
    /// of every subset generated so far augmented with `e`.
    pub fn power_set(&self) -> PowerSet<Self>
    where
        S: Clone,
    {
        let mut family = PowerSet::with_empty(Self::with_hasher(S::default()));
        for element in self {
            let generation: Vec<Self> = family
                .iter()
                .map(|subset| {
                    let mut augmented = subset.clone();
                    augmented.add(element.clone());
                    augmented
                })
                .collect();
            family.absorb_generation(generation);
        }
        family
    }
}

impl<T, S> ThreadUnsafeSet<T, S>
where
    T: Hash + Eq + Clone + Send + 'static,
    S: BuildHasher + Default,
{
    /// Returns a channel yielding every element.
    ///
    /// The producer walks a snapshot taken now; later mutations of `self` are
    /// not observed. Dropping the receiver ends the producer.
    pub fn iter_channel(&self) -> Receiver<T> {
        let snapshot = self.to_vec();
        iterator::spawn_channel(move |handoff| iterator::drain_into(handoff, snapshot))
    }

    /// Returns a stoppable iterator over a snapshot of the elements.
    pub fn iterator(&self) -> SetIterator<T> {
        let snapshot = self.to_vec();
        SetIterator::spawn(move |handoff| iterator::drain_into(handoff, snapshot))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, S> Default for ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> FromIterator<T> for ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T, const N: usize> From<[T; N]> for ThreadUnsafeSet<T, DefaultHashBuilder>
where
    T: Hash + Eq,
{
    fn from(values: [T; N]) -> Self {
        let mut set = Self::with_capacity(N);
        set.extend(values);
        set
    }
}

impl<T, S> IntoIterator for ThreadUnsafeSet<T, S> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, S> IntoIterator for &'a ThreadUnsafeSet<T, S> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> PartialEq for ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S> Eq for ThreadUnsafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
}

impl<T: fmt::Debug, S> fmt::Debug for ThreadUnsafeSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, S> fmt::Display for ThreadUnsafeSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Set{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, S> serde::Serialize for ThreadUnsafeSet<T, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct ThreadUnsafeSetVisitor<T, S> {
    marker: std::marker::PhantomData<fn() -> ThreadUnsafeSet<T, S>>,
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::de::Visitor<'de> for ThreadUnsafeSetVisitor<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    type Value = ThreadUnsafeSet<T, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set =
            ThreadUnsafeSet::with_capacity_and_hasher(seq.size_hint().unwrap_or(0), S::default());
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for ThreadUnsafeSet<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ThreadUnsafeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(feature = "json")]
impl<T, S> ThreadUnsafeSet<T, S>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Hash + Eq,
    S: BuildHasher + Default,
{
    /// Encodes the set as a JSON array of its elements.
    ///
    /// # Errors
    ///
    /// Fails if an element cannot be represented as JSON.
    pub fn marshal_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        crate::json::encode(self)
    }

    /// Decodes a JSON array and adds its items to the set.
    ///
    /// # Errors
    ///
    /// See [`json::decode_into`](crate::json::decode_into).
    pub fn unmarshal_json(
        &mut self,
        bytes: &[u8],
        mode: crate::json::DecodeMode,
    ) -> Result<(), crate::DecodeError> {
        crate::json::decode_into(bytes, mode, |element| {
            self.add(element);
        })
    }
}
