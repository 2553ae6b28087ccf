//! Set types and the capability trait they share.
//!
//! Two concrete variants implement the same algebra:
//!
//! - [`ThreadUnsafeSet`]: a bare hash set, mutated through `&mut self`.
//! - [`ThreadSafeSet`]: the same core behind a reader/writer lock, usable
//!   through a shared reference from many threads.
//!
//! Both expose strongly typed inherent methods, where mixing the variants in a
//! binary operation does not compile. For code that picks the variant at run
//! time, both also implement the object-safe [`Set`] trait and can be created
//! through [`new_set`] and friends. A binary operation on `dyn Set<T>` whose
//! operands are of different variants panics.
//!
//! # Examples
//!
//! ```rust
//! use setalg::{Concurrency, new_set};
//!
//! let fruits = new_set(Concurrency::ThreadSafe, ["apple", "banana", "pear"]);
//! assert_eq!(fruits.cardinality(), 3);
//! assert!(fruits.contains(&["apple", "pear"]));
//! assert!(!fruits.contains(&["apple", "kiwi"]));
//! ```

mod ordered_pair;
mod power_set;
mod thread_safe;
mod thread_unsafe;

pub use ordered_pair::OrderedPair;
pub use power_set::PowerSet;
pub use thread_safe::ThreadSafeSet;
pub use thread_unsafe::ThreadUnsafeSet;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crossbeam_channel::Receiver;

use crate::error::type_mismatch;
use crate::iterator::SetIterator;

/// Values that can be stored in a set used through the [`Set`] trait.
///
/// Blanket-implemented for every `Hash + Eq + Clone + Send + Sync + 'static`
/// type. The concrete set types only need `Hash + Eq` for most operations.
pub trait Element: Hash + Eq + Clone + Send + Sync + 'static {}

impl<T: Hash + Eq + Clone + Send + Sync + 'static> Element for T {}

/// Which concrete variant a dynamic factory builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Concurrency {
    /// [`ThreadSafeSet`]: every operation is guarded by a reader/writer lock.
    #[default]
    ThreadSafe,
    /// [`ThreadUnsafeSet`]: no locking; the caller synchronizes.
    ThreadUnsafe,
}

/// The polymorphic set contract.
///
/// Every binary operation requires `other` to be the same concrete type as
/// `self`. Passing a different variant is a programming error and panics.
/// Results are new sets of the receiver's variant; operands are never
/// modified.
pub trait Set<T: Element>: Any + Send + Sync + 'static {
    /// Adds `value`, returning `true` if it was not already present.
    fn add(&mut self, value: T) -> bool;

    /// Adds every value, returning how many were new.
    fn append(&mut self, values: &[T]) -> usize;

    /// Removes `value` if present.
    fn remove(&mut self, value: &T);

    /// Removes every value that is present.
    fn remove_all(&mut self, values: &[T]);

    /// Empties the set.
    fn clear(&mut self);

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of elements.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set has no elements.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Returns `true` if every value is present (`true` for no values).
    fn contains(&self, values: &[T]) -> bool;

    /// Returns `true` if `value` is present.
    fn contains_one(&self, value: &T) -> bool;

    /// Returns `true` if at least one value is present (`false` for no values).
    fn contains_any(&self, values: &[T]) -> bool;

    /// Returns `true` if the two sets share an element.
    fn contains_any_element(&self, other: &dyn Set<T>) -> bool;

    /// Returns `true` if both sets hold the same elements.
    fn equal(&self, other: &dyn Set<T>) -> bool;

    /// Returns `true` if every element of `self` is in `other`.
    fn is_subset(&self, other: &dyn Set<T>) -> bool;

    /// Returns `true` if `self` is a subset of `other` and not equal to it.
    fn is_proper_subset(&self, other: &dyn Set<T>) -> bool;

    /// Returns `true` if every element of `other` is in `self`.
    fn is_superset(&self, other: &dyn Set<T>) -> bool;

    /// Returns `true` if `self` is a superset of `other` and not equal to it.
    fn is_proper_superset(&self, other: &dyn Set<T>) -> bool;

    /// Returns a new set with the elements of either set.
    fn union(&self, other: &dyn Set<T>) -> Box<dyn Set<T>>;

    /// Returns a new set with the elements present in both sets.
    fn intersect(&self, other: &dyn Set<T>) -> Box<dyn Set<T>>;

    /// Returns a new set with the elements of `self` absent from `other`.
    fn difference(&self, other: &dyn Set<T>) -> Box<dyn Set<T>>;

    /// Returns a new set with the elements in exactly one of the two sets.
    fn symmetric_difference(&self, other: &dyn Set<T>) -> Box<dyn Set<T>>;

    /// Returns the set of ordered pairs `(a, b)`, `a` from `self`, `b` from `other`.
    ///
    /// The pairs come back in a plain [`ThreadUnsafeSet`] whatever the
    /// receiver's variant; wrap it with [`ThreadSafeSet::from`] to share it.
    fn cartesian_product(&self, other: &dyn Set<T>) -> ThreadUnsafeSet<OrderedPair<T>>;

    /// Returns every subset of `self`.
    fn power_set(&self) -> PowerSet<Box<dyn Set<T>>>;

    /// Returns an independent copy holding the same elements.
    fn clone_set(&self) -> Box<dyn Set<T>>;

    /// Calls `callback` on every element until it returns `true`.
    fn each(&self, callback: &mut dyn FnMut(&T) -> bool);

    /// Calls `yield_element` on every element while it returns `true`.
    fn elements(&self, yield_element: &mut dyn FnMut(&T) -> bool) {
        self.each(&mut |element| !yield_element(element));
    }

    /// Copies the elements into a vector in unspecified order.
    fn to_vec(&self) -> Vec<T>;

    /// Returns a channel yielding every element.
    fn iter_channel(&self) -> Receiver<T>;

    /// Returns a stoppable iterator over the elements.
    fn iterator(&self) -> SetIterator<T>;

    /// Renders the set as `Set{e1, e2, ...}`.
    fn render(&self) -> String
    where
        T: fmt::Display;

    /// The concrete type name, used in type-mismatch reports.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Resolves `other` to the receiver's concrete type or aborts.
#[track_caller]
fn same_variant<'a, X, T>(other: &'a dyn Set<T>) -> &'a X
where
    X: Set<T>,
    T: Element,
{
    let any: &dyn Any = other;
    match any.downcast_ref::<X>() {
        Some(concrete) => concrete,
        None => type_mismatch(std::any::type_name::<X>(), other.type_name()),
    }
}

/// Implements [`Set`] for a concrete variant by forwarding to its inherent
/// methods. The variants differ only in the receiver mutability of those
/// methods, which auto-ref hides.
macro_rules! forward_set_impl {
    ($variant:ident) => {
        impl<T, S> Set<T> for $variant<T, S>
        where
            T: Element,
            S: BuildHasher + Default + Clone + Send + Sync + 'static,
        {
            fn add(&mut self, value: T) -> bool {
                $variant::add(self, value)
            }

            fn append(&mut self, values: &[T]) -> usize {
                $variant::append(self, values.iter().cloned())
            }

            fn remove(&mut self, value: &T) {
                $variant::remove(self, value);
            }

            fn remove_all(&mut self, values: &[T]) {
                $variant::remove_all(self, values);
            }

            fn clear(&mut self) {
                $variant::clear(self);
            }

            fn pop(&mut self) -> Option<T> {
                $variant::pop(self)
            }

            fn cardinality(&self) -> usize {
                $variant::cardinality(self)
            }

            fn contains(&self, values: &[T]) -> bool {
                $variant::contains(self, values)
            }

            fn contains_one(&self, value: &T) -> bool {
                $variant::contains_one(self, value)
            }

            fn contains_any(&self, values: &[T]) -> bool {
                $variant::contains_any(self, values)
            }

            #[track_caller]
            fn contains_any_element(&self, other: &dyn Set<T>) -> bool {
                $variant::contains_any_element(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn equal(&self, other: &dyn Set<T>) -> bool {
                $variant::equal(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn is_subset(&self, other: &dyn Set<T>) -> bool {
                $variant::is_subset(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn is_proper_subset(&self, other: &dyn Set<T>) -> bool {
                $variant::is_proper_subset(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn is_superset(&self, other: &dyn Set<T>) -> bool {
                $variant::is_superset(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn is_proper_superset(&self, other: &dyn Set<T>) -> bool {
                $variant::is_proper_superset(self, same_variant::<Self, T>(other))
            }

            #[track_caller]
            fn union(&self, other: &dyn Set<T>) -> Box<dyn Set<T>> {
                Box::new($variant::union(self, same_variant::<Self, T>(other)))
            }

            #[track_caller]
            fn intersect(&self, other: &dyn Set<T>) -> Box<dyn Set<T>> {
                Box::new($variant::intersect(self, same_variant::<Self, T>(other)))
            }

            #[track_caller]
            fn difference(&self, other: &dyn Set<T>) -> Box<dyn Set<T>> {
                Box::new($variant::difference(self, same_variant::<Self, T>(other)))
            }

            #[track_caller]
            fn symmetric_difference(&self, other: &dyn Set<T>) -> Box<dyn Set<T>> {
                Box::new($variant::symmetric_difference(
                    self,
                    same_variant::<Self, T>(other),
                ))
            }

            #[track_caller]
            fn cartesian_product(&self, other: &dyn Set<T>) -> ThreadUnsafeSet<OrderedPair<T>> {
                $variant::cartesian_product(self, same_variant::<Self, T>(other))
                    .to_vec()
                    .into_iter()
                    .collect()
            }

            fn power_set(&self) -> PowerSet<Box<dyn Set<T>>> {
                $variant::power_set(self).map_subsets(|subset| Box::new(subset) as Box<dyn Set<T>>)
            }

            fn clone_set(&self) -> Box<dyn Set<T>> {
                Box::new(self.clone())
            }

            fn each(&self, callback: &mut dyn FnMut(&T) -> bool) {
                $variant::each(self, callback);
            }

            fn to_vec(&self) -> Vec<T> {
                $variant::to_vec(self)
            }

            fn iter_channel(&self) -> Receiver<T> {
                $variant::iter_channel(self)
            }

            fn iterator(&self) -> SetIterator<T> {
                $variant::iterator(self)
            }

            fn render(&self) -> String
            where
                T: fmt::Display,
            {
                self.to_string()
            }
        }
    };
}

forward_set_impl!(ThreadUnsafeSet);
forward_set_impl!(ThreadSafeSet);

impl<T: Element> PartialEq for dyn Set<T> {
    /// Set equality; panics if the operands are different variants.
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Element + fmt::Display> fmt::Display for dyn Set<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.render())
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for dyn Set<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.to_vec()).finish()
    }
}

// =============================================================================
// Dynamic Factories
// =============================================================================

fn boxed<T, I>(concurrency: Concurrency, values: I) -> Box<dyn Set<T>>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    match concurrency {
        Concurrency::ThreadSafe => Box::new(values.into_iter().collect::<ThreadSafeSet<T>>()),
        Concurrency::ThreadUnsafe => {
            Box::new(values.into_iter().collect::<ThreadUnsafeSet<T>>())
        }
    }
}

/// Creates a set of the chosen variant holding `values`.
pub fn new_set<T: Element>(
    concurrency: Concurrency,
    values: impl IntoIterator<Item = T>,
) -> Box<dyn Set<T>> {
    boxed(concurrency, values)
}

/// Creates an empty set of the chosen variant, pre-sized for `capacity`
/// elements.
pub fn new_set_with_capacity<T: Element>(
    concurrency: Concurrency,
    capacity: usize,
) -> Box<dyn Set<T>> {
    match concurrency {
        Concurrency::ThreadSafe => Box::new(ThreadSafeSet::<T>::with_capacity(capacity)),
        Concurrency::ThreadUnsafe => Box::new(ThreadUnsafeSet::<T>::with_capacity(capacity)),
    }
}

/// Creates a set of the chosen variant from the keys of `map`.
pub fn new_set_from_map_keys<T, V, H>(
    concurrency: Concurrency,
    map: &HashMap<T, V, H>,
) -> Box<dyn Set<T>>
where
    T: Element,
{
    boxed(concurrency, map.keys().cloned())
}

/// Creates a set of the chosen variant from the keys of a pair sequence.
pub fn new_set_from_pair_keys<T: Element, V>(
    concurrency: Concurrency,
    pairs: impl IntoIterator<Item = (T, V)>,
) -> Box<dyn Set<T>> {
    boxed(concurrency, pairs.into_iter().map(|(key, _)| key))
}

/// Creates a set of the chosen variant from the values of a pair sequence.
pub fn new_set_from_pair_values<K, T: Element>(
    concurrency: Concurrency,
    pairs: impl IntoIterator<Item = (K, T)>,
) -> Box<dyn Set<T>> {
    boxed(concurrency, pairs.into_iter().map(|(_, value)| value))
}

/// Returns the elements of `set` in ascending order.
///
/// ```rust
/// use setalg::{ThreadUnsafeSet, sorted};
///
/// let set = ThreadUnsafeSet::from(["pear", "apple", "banana"]);
/// assert_eq!(sorted(&set), vec!["apple", "banana", "pear"]);
/// ```
pub fn sorted<T: Element + Ord>(set: &dyn Set<T>) -> Vec<T> {
    let mut elements = set.to_vec();
    elements.sort();
    elements
}
