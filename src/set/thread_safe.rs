//! Reader/writer-locked set for concurrent use.
//!
//! [`ThreadSafeSet`] decorates a [`ThreadUnsafeSet`] with a single
//! [`parking_lot::RwLock`]. It never changes the algebra; it only makes every
//! call atomic with respect to other threads.
//!
//! # Locking discipline
//!
//! - `add`, `append`, `remove`, `remove_all`, `clear` and `pop` take the write lock.
//! - Every read takes the lock with `read_recursive`, which never queues
//!   behind a waiting writer. A read issued while the same thread already
//!   holds a read (inside an `each` callback, or next to an unfinished
//!   iterator) therefore cannot deadlock against a writer on another thread.
//!   A steady stream of overlapping readers can starve writers.
//! - Binary operations read-lock the receiver, then the argument, so two
//!   threads combining the same pair of sets in opposite roles cannot
//!   deadlock. When both operands are the same set the receiver's guard is
//!   reused.
//! - `iterator` and `iter_channel` hold the read lock on the producer thread,
//!   from the moment the producer starts until it finishes or is stopped.
//!
//! Calling a write operation on a set from inside its own `each` callback, or
//! while holding an unfinished iterator over it on the same thread, deadlocks:
//! the write lock waits for a read lock that only this thread can release.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use setalg::ThreadSafeSet;
//!
//! let set: Arc<ThreadSafeSet<i32>> = Arc::new(ThreadSafeSet::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for value in worker * 100..(worker + 1) * 100 {
//!                 set.add(value);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.cardinality(), 400);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;

use super::{OrderedPair, PowerSet, ThreadUnsafeSet};
use crate::hasher::DefaultHashBuilder;
use crate::iterator::{self, SetIterator};

/// An unordered set of unique elements that can be shared between threads.
///
/// All methods take `&self`; wrap the set in an [`Arc`] to share it.
/// [`Clone`] produces an independent set with its own lock.
pub struct ThreadSafeSet<T, S = DefaultHashBuilder> {
    inner: Arc<RwLock<ThreadUnsafeSet<T, S>>>,
}

static_assertions::assert_impl_all!(ThreadSafeSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(ThreadSafeSet<String>: Send, Sync);
static_assertions::assert_not_impl_any!(ThreadSafeSet<std::rc::Rc<i32>>: Send, Sync);

impl<T, S> ThreadSafeSet<T, S> {
    fn wrap(core: ThreadUnsafeSet<T, S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    /// Returns the number of elements in the set.
    pub fn cardinality(&self) -> usize {
        self.inner.read_recursive().cardinality()
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.read_recursive().is_empty()
    }

    /// Runs `operation` with both operands read-locked, receiver first.
    fn with_both<R>(
        &self,
        other: &Self,
        operation: impl FnOnce(&ThreadUnsafeSet<T, S>, &ThreadUnsafeSet<T, S>) -> R,
    ) -> R {
        let receiver = self.inner.read_recursive();
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return operation(&*receiver, &*receiver);
        }
        let argument = other.inner.read_recursive();
        operation(&*receiver, &*argument)
    }
}

impl<T> ThreadSafeSet<T, DefaultHashBuilder> {
    /// Creates an empty set using the [`DefaultHashBuilder`].
    #[must_use]
    pub fn new() -> Self {
        Self::wrap(ThreadUnsafeSet::new())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::wrap(ThreadUnsafeSet::with_capacity(capacity))
    }
}

impl<T, S> ThreadSafeSet<T, S> {
    /// Creates an empty set that hashes with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::wrap(ThreadUnsafeSet::with_hasher(hasher))
    }

    /// Creates an empty set with room for `capacity` elements that hashes
    /// with `hasher`.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::wrap(ThreadUnsafeSet::with_capacity_and_hasher(capacity, hasher))
    }
}

impl<T, S> ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{

    /// Creates a set from the keys of a map.
    #[must_use]
    pub fn from_map_keys<'a, V, M>(map: M) -> Self
    where
        T: Clone + 'a,
        V: 'a,
        M: IntoIterator<Item = (&'a T, &'a V)>,
    {
        Self::wrap(ThreadUnsafeSet::from_map_keys(map))
    }

    /// Creates a set from the keys of a sequence of key/value pairs.
    #[must_use]
    pub fn from_pair_keys<V>(pairs: impl IntoIterator<Item = (T, V)>) -> Self {
        Self::wrap(ThreadUnsafeSet::from_pair_keys(pairs))
    }

    /// Creates a set from the values of a sequence of key/value pairs.
    #[must_use]
    pub fn from_pair_values<K>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
        Self::wrap(ThreadUnsafeSet::from_pair_values(pairs))
    }

    /// Adds `value`, returning `true` if it was not already present.
    pub fn add(&self, value: T) -> bool {
        self.inner.write().add(value)
    }

    /// Adds every value under one write lock, returning how many were new.
    pub fn append(&self, values: impl IntoIterator<Item = T>) -> usize {
        self.inner.write().append(values)
    }

    /// Removes `value` if present.
    pub fn remove<Q>(&self, value: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(value);
    }

    /// Removes every value that is present, under one write lock.
    pub fn remove_all<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        self.inner.write().remove_all(values);
    }

    /// Empties the set.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Returns `true` if every value is present.
    pub fn contains<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        self.inner.read_recursive().contains(values)
    }

    /// Returns `true` if `value` is present.
    pub fn contains_one<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read_recursive().contains_one(value)
    }

    /// Returns `true` if at least one value is present.
    pub fn contains_any<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        self.inner.read_recursive().contains_any(values)
    }

    /// Returns `true` if the two sets share at least one element.
    pub fn contains_any_element(&self, other: &Self) -> bool {
        self.with_both(other, ThreadUnsafeSet::contains_any_element)
    }

    /// Returns `true` if both sets hold the same elements.
    pub fn equal(&self, other: &Self) -> bool {
        self.with_both(other, ThreadUnsafeSet::equal)
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.with_both(other, ThreadUnsafeSet::is_subset)
    }

    /// Returns `true` if `self` is a subset of `other` and not equal to it.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.with_both(other, ThreadUnsafeSet::is_proper_subset)
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and not equal to it.
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Calls `callback` on every element until it returns `true`.
    ///
    /// The read lock is held for the whole traversal.
    pub fn each(&self, callback: impl FnMut(&T) -> bool) {
        self.inner.read_recursive().each(callback);
    }

    /// Calls `yield_element` on every element while it returns `true`.
    pub fn elements(&self, yield_element: impl FnMut(&T) -> bool) {
        self.inner.read_recursive().elements(yield_element);
    }
}

impl<T, S> ThreadSafeSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Returns a new set with the elements of either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::wrap(self.with_both(other, ThreadUnsafeSet::union))
    }

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self::wrap(self.with_both(other, ThreadUnsafeSet::intersect))
    }

    /// Returns a new set with the elements of `self` absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self::wrap(self.with_both(other, ThreadUnsafeSet::difference))
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::wrap(self.with_both(other, ThreadUnsafeSet::symmetric_difference))
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.write().pop()
    }

    /// Copies the elements into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read_recursive().to_vec()
    }

    /// Returns the set of all ordered pairs `(a, b)` with `a` from `self` and
    /// `b` from `other`.
    #[must_use]
    pub fn cartesian_product(&self, other: &Self) -> ThreadSafeSet<OrderedPair<T>, S> {
        ThreadSafeSet::wrap(self.with_both(other, ThreadUnsafeSet::cartesian_product))
    }

    /// Returns every subset of `self`, each as an independent thread-safe set.
    pub fn power_set(&self) -> PowerSet<Self>
    where
        S: Clone,
    {
        let family = self.inner.read_recursive().power_set();
        family.map_subsets(Self::wrap)
    }
}

impl<T, S> ThreadSafeSet<T, S>
where
    T: Hash + Eq + Clone + Send + Sync + 'static,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    /// Returns a channel yielding every element.
    ///
    /// The producer holds the read lock until it has handed over every
    /// element or the receiver is dropped.
    pub fn iter_channel(&self) -> Receiver<T> {
        let inner = Arc::clone(&self.inner);
        iterator::spawn_channel(move |handoff| {
            let guard = inner.read_recursive();
            iterator::drain_into(handoff, guard.iter().cloned());
        })
    }

    /// Returns a stoppable iterator over the elements.
    ///
    /// The producer holds the read lock until it is exhausted or stopped.
    pub fn iterator(&self) -> SetIterator<T> {
        let inner = Arc::clone(&self.inner);
        SetIterator::spawn(move |handoff| {
            let guard = inner.read_recursive();
            iterator::drain_into(handoff, guard.iter().cloned());
        })
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, S> Clone for ThreadSafeSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self::wrap(self.inner.read_recursive().clone())
    }
}

impl<T, S> Default for ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::wrap(ThreadUnsafeSet::default())
    }
}

impl<T, S> FromIterator<T> for ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::wrap(iter.into_iter().collect())
    }
}

impl<T, S> Extend<T> for ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.write().extend(iter);
    }
}

impl<T, const N: usize> From<[T; N]> for ThreadSafeSet<T, DefaultHashBuilder>
where
    T: Hash + Eq,
{
    fn from(values: [T; N]) -> Self {
        Self::wrap(ThreadUnsafeSet::from(values))
    }
}

impl<T, S> From<ThreadUnsafeSet<T, S>> for ThreadSafeSet<T, S> {
    fn from(core: ThreadUnsafeSet<T, S>) -> Self {
        Self::wrap(core)
    }
}

impl<T, S> PartialEq for ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S> Eq for ThreadSafeSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
}

impl<T: fmt::Debug, S> fmt::Debug for ThreadSafeSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read_recursive(), formatter)
    }
}

impl<T: fmt::Display, S> fmt::Display for ThreadSafeSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read_recursive(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, S> serde::Serialize for ThreadSafeSet<T, S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serde::Serialize::serialize(&*self.inner.read_recursive(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for ThreadSafeSet<T, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <ThreadUnsafeSet<T, S> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::wrap)
    }
}

#[cfg(feature = "json")]
impl<T, S> ThreadSafeSet<T, S>
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
        self.inner.read_recursive().marshal_json()
    }

    /// Decodes a JSON array and adds its items to the set under one write lock.
    ///
    /// # Errors
    ///
    /// See [`json::decode_into`](crate::json::decode_into).
    pub fn unmarshal_json(
        &self,
        bytes: &[u8],
        mode: crate::json::DecodeMode,
    ) -> Result<(), crate::DecodeError> {
        self.inner.write().unmarshal_json(bytes, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_shared_reference_mutation() {
        let set = ThreadSafeSet::<i32>::new();
        assert!(set.add(1));
        assert!(!set.add(1));
        assert_eq!(set.append([2, 3]), 2);
        set.remove(&1);
        assert_eq!(set, ThreadSafeSet::from([2, 3]));
    }

    #[rstest]
    fn test_binary_operation_with_itself() {
        let set = ThreadSafeSet::from([1, 2, 3]);
        assert_eq!(set.union(&set), set);
        assert_eq!(set.intersect(&set), set);
        assert!(set.difference(&set).is_empty());
        assert!(set.equal(&set));
        assert!(!set.is_proper_subset(&set));
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original = ThreadSafeSet::from([1]);
        let copy = original.clone();
        original.add(2);
        assert_eq!(copy, ThreadSafeSet::from([1]));
        assert_eq!(original.cardinality(), 2);
    }

    #[rstest]
    fn test_results_have_their_own_lock() {
        let set_a = ThreadSafeSet::from([1, 2]);
        let set_b = ThreadSafeSet::from([2, 3]);
        let union = set_a.union(&set_b);
        union.add(4);
        assert_eq!(set_a, ThreadSafeSet::from([1, 2]));
        assert_eq!(union, ThreadSafeSet::from([1, 2, 3, 4]));
    }

    #[rstest]
    fn test_power_set_members_are_safe_sets() {
        let power_set = ThreadSafeSet::from([1, 2]).power_set();
        assert_eq!(power_set.cardinality(), 4);
        assert!(power_set.contains(&ThreadSafeSet::from([2])));
    }

    #[rstest]
    fn test_from_unsafe_core() {
        let set = ThreadSafeSet::from(ThreadUnsafeSet::from(["a", "b"]));
        assert!(set.contains(&["a", "b"]));
        assert_eq!(set.to_string().len(), "Set{a, b}".len());
    }

    #[rstest]
    fn test_dropped_iterator_releases_read_lock() {
        let set: ThreadSafeSet<i32> = (0..50).collect();
        let mut iterator = set.iterator();
        assert!(iterator.next().is_some());
        drop(iterator);
        // The producer exits at its next hand-off, after which the write lock
        // becomes available.
        assert!(set.add(50));
        assert_eq!(set.cardinality(), 51);
    }

    #[rstest]
    fn test_reads_inside_each_pass_a_queued_writer() {
        let set = Arc::new(ThreadSafeSet::from([1, 2, 3]));
        let mut writer = None;

        set.each(|_| {
            let shared = Arc::clone(&set);
            writer = Some(std::thread::spawn(move || shared.add(4)));
            // Give the writer time to queue on the held read lock.
            std::thread::sleep(std::time::Duration::from_millis(50));

            assert_eq!(set.cardinality(), 3);
            assert!(set.contains_one(&2));
            assert_eq!(set.union(&set).cardinality(), 3);
            let mut iterator = set.iterator();
            assert!(iterator.next().is_some());
            iterator.stop();
            true
        });

        let added = writer.map(|handle| handle.join().unwrap());
        assert_eq!(added, Some(true));
        assert_eq!(set.cardinality(), 4);
    }
}
