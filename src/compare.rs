//! Comparators: the strict weak orders a tree sorts its keys by.

use core::fmt;

/// A strict weak order over keys of type `K`.
///
/// Two keys are equivalent when neither is [`less`](Compare::less) than the
/// other. The tree never asks for anything but `less`.
///
/// # Examples
///
/// ```
/// use rb_tree::{Compare, FnCompare, Natural, Reversed};
///
/// assert!(Natural.less(&1, &2));
/// assert!(Reversed.less(&2, &1));
///
/// let by_len = FnCompare::new(|a: &&str, b: &&str| a.len() < b.len());
/// assert!(by_len.less(&"ab", &"abc"));
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: ?Sized + Ord> Compare<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reversed;

impl<K: ?Sized + Ord> Compare<K> for Reversed {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

/// Adapts a `less`-style closure into a [`Compare`].
#[derive(Clone, Copy, Default)]
pub struct FnCompare<F>(F);

impl<F> FnCompare<F> {
    /// Wraps `less`, which must be a strict weak order.
    pub const fn new(less: F) -> Self {
        Self(less)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> Compare<K> for FnCompare<F> {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnCompare<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCompare(..)")
    }
}
