//! A dedicated container for the subsets of a set.
//!
//! Hash sets are not themselves hashable, so a family of subsets cannot be
//! stored in another hash set. [`PowerSet`] keeps the subsets in a vector
//! instead. Uniqueness comes from the way the family is built: every
//! generation of subsets contains an element that none of the previous
//! subsets contain, so appending a generation never introduces a duplicate.

use std::fmt;

/// The set of all subsets of a set.
///
/// `S` is the subset type: [`ThreadUnsafeSet`](crate::ThreadUnsafeSet),
/// [`ThreadSafeSet`](crate::ThreadSafeSet), or `Box<dyn Set<T>>`.
///
/// # Examples
///
/// ```rust
/// use setalg::ThreadUnsafeSet;
///
/// let set = ThreadUnsafeSet::from([1, 2, 3]);
/// let power_set = set.power_set();
///
/// assert_eq!(power_set.cardinality(), 8);
/// assert!(power_set.contains(&ThreadUnsafeSet::new()));
/// assert!(power_set.contains(&set));
/// ```
#[derive(Clone)]
pub struct PowerSet<S> {
    subsets: Vec<S>,
}

impl<S> PowerSet<S> {
    /// Starts a family holding only the empty subset.
    pub(crate) fn with_empty(empty: S) -> Self {
        Self {
            subsets: vec![empty],
        }
    }

    /// Adds a generation of subsets built by augmenting existing ones with an
    /// element none of them contain.
    pub(crate) fn absorb_generation(&mut self, generation: Vec<S>) {
        self.subsets.extend(generation);
    }

    /// Converts every subset to another representation.
    pub(crate) fn map_subsets<U>(self, function: impl FnMut(S) -> U) -> PowerSet<U> {
        PowerSet {
            subsets: self.subsets.into_iter().map(function).collect(),
        }
    }

    /// Number of subsets in the family.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.subsets.len()
    }

    /// A power set always holds at least the empty subset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Iterates the subsets in unspecified order.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.subsets.iter()
    }
}

impl<S: PartialEq> PowerSet<S> {
    /// Returns `true` if `subset` is one of the members.
    pub fn contains(&self, subset: &S) -> bool {
        self.subsets.iter().any(|member| member == subset)
    }
}

impl<S: PartialEq> PartialEq for PowerSet<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cardinality() == other.cardinality()
            && self.subsets.iter().all(|subset| other.contains(subset))
    }
}

impl<S> IntoIterator for PowerSet<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.subsets.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a PowerSet<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: fmt::Debug> fmt::Debug for PowerSet<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.subsets.iter()).finish()
    }
}

impl<S: fmt::Display> fmt::Display for PowerSet<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Set{{")?;
        for (index, subset) in self.subsets.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{subset}")?;
        }
        write!(formatter, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_with_empty_holds_one_member() {
        let family = PowerSet::with_empty(Vec::<i32>::new());
        assert_eq!(family.cardinality(), 1);
        assert!(!family.is_empty());
        assert!(family.contains(&Vec::new()));
    }

    #[rstest]
    fn test_equality_ignores_member_order() {
        let mut left = PowerSet::with_empty(vec![0]);
        left.absorb_generation(vec![vec![1], vec![2]]);
        let mut right = PowerSet::with_empty(vec![2]);
        right.absorb_generation(vec![vec![0], vec![1]]);
        assert_eq!(left, right);
    }

    #[rstest]
    fn test_map_subsets_keeps_cardinality() {
        let mut family = PowerSet::with_empty(vec![0]);
        family.absorb_generation(vec![vec![1, 2]]);
        let lengths = family.map_subsets(|subset| subset.len());
        assert_eq!(lengths.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
