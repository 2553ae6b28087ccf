//! Ordered 2-tuples, the element type of a Cartesian product.

use std::fmt;

/// An ordered pair of two values of the same type.
///
/// Equality is component-wise and order-sensitive: `(1, 2) != (2, 1)`.
///
/// # Examples
///
/// ```rust
/// use setalg::OrderedPair;
///
/// let pair = OrderedPair::new(1, 2);
/// assert_eq!(pair.to_string(), "(1, 2)");
/// assert_ne!(pair, OrderedPair::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedPair<T> {
    /// The element taken from the receiver of the product.
    pub first: T,
    /// The element taken from the argument of the product.
    pub second: T,
}

impl<T> OrderedPair<T> {
    /// Creates a pair from its two components.
    #[inline]
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Splits the pair into a tuple.
    #[inline]
    pub fn into_tuple(self) -> (T, T) {
        (self.first, self.second)
    }
}

impl<T> From<(T, T)> for OrderedPair<T> {
    fn from((first, second): (T, T)) -> Self {
        Self::new(first, second)
    }
}

impl<T: fmt::Display> fmt::Display for OrderedPair<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OrderedPair::new(1, 2), OrderedPair::new(1, 2), true)]
    #[case(OrderedPair::new(1, 2), OrderedPair::new(2, 1), false)]
    #[case(OrderedPair::new(1, 1), OrderedPair::new(1, 2), false)]
    fn test_equality_is_order_sensitive(
        #[case] left: OrderedPair<i32>,
        #[case] right: OrderedPair<i32>,
        #[case] expected: bool,
    ) {
        assert_eq!(left == right, expected);
    }

    #[rstest]
    fn test_display() {
        assert_eq!(OrderedPair::new("a", "b").to_string(), "(a, b)");
    }

    #[rstest]
    fn test_tuple_conversion() {
        let pair: OrderedPair<u8> = (3, 4).into();
        assert_eq!(pair.into_tuple(), (3, 4));
    }
}
