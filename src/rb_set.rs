//! Ordered sets: [`RbSet`] with unique elements and [`RbMultiSet`] allowing duplicates.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::RangeBounds;

use crate::compare::{Compare, Natural};
use crate::error::Error;
use crate::key_of::Identity;
use crate::rb_tree::{IntoIter, Iter, Range, RbTree};

/// An ordered set based on a red-black tree.
///
/// Elements are kept sorted by the comparator `C`, which defaults to the
/// elements' [`Ord`] order. Inserting an element equivalent to one already in
/// the set leaves the set unchanged.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element changes while it is in the set. The
/// behavior resulting from such a logic error is not specified, but will not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rb_tree::RbSet;
///
/// let mut books = RbSet::new();
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
///
/// assert!(books.contains("The Odyssey"));
/// assert!(!books.insert("The Odyssey"));
///
/// books.remove("The Odyssey");
/// assert_eq!(books.len(), 2);
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A set with a custom order:
///
/// ```
/// use rb_tree::{RbSet, Reversed};
///
/// let mut set = RbSet::with_comparator(Reversed);
/// set.extend([1, 3, 2]);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub struct RbSet<T, C = Natural> {
    tree: RbTree<T, Identity, C>,
}

impl<T> RbSet<T> {
    /// Makes a new, empty `RbSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let mut set: RbSet<i32> = RbSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        RbSet { tree: RbTree::new() }
    }
}

impl<T, C> RbSet<T, C> {
    /// Makes a new, empty `RbSet` ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        RbSet {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Returns the underlying tree, for position-based access.
    pub const fn as_tree(&self) -> &RbTree<T, Identity, C> {
        &self.tree
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let mut v = RbSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a reference to the first element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let set = RbSet::from([3, 1, 2]);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last element in the set, if any.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn last(&self) -> Option<&T> {
        self.tree.last_value()
    }

    /// Removes the first element from the set and returns it, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.take_first()
    }

    /// Removes the last element from the set and returns it, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.take_last()
    }

    /// Gets an iterator that visits the elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let set = RbSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let mut set: RbSet<i32> = (0..8).collect();
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([0, 2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(|v| f(v));
    }
}

impl<T, C> RbSet<T, C> {
    /// Returns `true` if the set contains an element equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let set = RbSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element equivalent to `value`, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(value))
    }

    /// Returns 1 if the set contains `value`, 0 otherwise.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count_unique(value)
    }

    /// Removes the element equivalent to `value`. Returns whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let mut set = RbSet::from([2]);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase_unique(value) == 1
    }

    /// Removes and returns the element equivalent to `value`, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(value);
        if found.is_end() {
            return None;
        }
        Some(self.tree.erase(found).1)
    }

    /// Gets an iterator over the elements within `range`, in order.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if `start == end` and both bounds are excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    /// use std::ops::Bound::Included;
    ///
    /// let set = RbSet::from([3, 5, 8]);
    /// assert_eq!(set.range((Included(4), Included(8))).collect::<Vec<_>>(), [&5, &8]);
    /// assert_eq!(set.range(4..).next(), Some(&5));
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.range(range)
    }
}

impl<T, C: Compare<T>> RbSet<T, C> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. An equivalent element
    /// already in the set is kept and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the set is at [`RbTree::max_size`] or allocation fails.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[track_caller]
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert_unique(value).1
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the set is full or allocation fails; the set is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        self.tree.try_insert_unique(value).map(|(_, inserted)| inserted)
    }

    /// Adds a value to the set, replacing and returning an equivalent element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(Vec::<i32>::new());
    ///
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
    /// set.replace(Vec::with_capacity(10));
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 10);
    /// ```
    #[track_caller]
    pub fn replace(&mut self, value: T) -> Option<T> {
        let pos = self.tree.lower_bound(&value);
        let present = self.tree.get(pos).is_some_and(|v| !self.tree.comparator().less(&value, v));
        if present {
            return self.tree.get_mut(pos).map(|slot| core::mem::replace(slot, value));
        }
        self.tree.insert_unique_hint(pos, value);
        None
    }
}

impl<T: Clone, C: Clone> Clone for RbSet<T, C> {
    fn clone(&self) -> Self {
        RbSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: Hash, C> Hash for RbSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<T: PartialEq, C> PartialEq for RbSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for RbSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for RbSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C> Ord for RbSet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RbSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for RbSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for RbSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Compare<T>> Extend<T> for RbSet<T, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.insert_unique_iter(iter);
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for RbSet<T, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for RbSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a RbSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An ordered multiset based on a red-black tree.
///
/// Like [`RbSet`], but equivalent elements may be stored more than once. They
/// are kept in insertion order relative to each other.
///
/// # Examples
///
/// ```
/// use rb_tree::RbMultiSet;
///
/// let mut bag = RbMultiSet::new();
/// bag.extend(["pear", "apple", "pear", "fig"]);
///
/// assert_eq!(bag.count("pear"), 2);
/// assert_eq!(bag.iter().copied().collect::<Vec<_>>(), ["apple", "fig", "pear", "pear"]);
///
/// assert!(bag.remove("pear"));
/// assert_eq!(bag.count("pear"), 1);
/// assert_eq!(bag.remove_all("pear"), 1);
/// assert!(!bag.contains("pear"));
/// ```
pub struct RbMultiSet<T, C = Natural> {
    tree: RbTree<T, Identity, C>,
}

impl<T> RbMultiSet<T> {
    /// Makes a new, empty `RbMultiSet`.
    #[must_use]
    pub fn new() -> Self {
        RbMultiSet { tree: RbTree::new() }
    }
}

impl<T, C> RbMultiSet<T, C> {
    /// Makes a new, empty `RbMultiSet` ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        RbMultiSet {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Returns the underlying tree, for position-based access.
    pub const fn as_tree(&self) -> &RbTree<T, Identity, C> {
        &self.tree
    }

    /// Returns the number of elements, counting duplicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The smallest element; the earliest inserted among equals.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// The largest element; the latest inserted among equals.
    pub fn last(&self) -> Option<&T> {
        self.tree.last_value()
    }

    /// Removes and returns the first element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.take_first()
    }

    /// Removes and returns the last element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.take_last()
    }

    /// Gets an iterator over every element in order, duplicates included.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Retains only the elements specified by the predicate.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(|v| f(v));
    }

    /// Returns `true` if at least one element is equivalent to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(value)
    }

    /// The first element equivalent to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(value))
    }

    /// Number of elements equivalent to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n + count)
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count_multi(value)
    }

    /// Gets an iterator over every element equivalent to `value`, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::{FnCompare, RbMultiSet};
    ///
    /// let by_len = FnCompare::new(|a: &&str, b: &&str| a.len() < b.len());
    /// let mut words = RbMultiSet::with_comparator(by_len);
    /// words.extend(["one", "three", "two", "six"]);
    ///
    /// assert_eq!(words.equal_range(&"xyz").copied().collect::<Vec<_>>(), ["one", "two", "six"]);
    /// ```
    pub fn equal_range<Q>(&self, value: &Q) -> Range<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.tree.equal_range_multi(value);
        self.tree.range_positions(first, last)
    }

    /// Removes one element equivalent to `value`, the earliest inserted.
    /// Returns whether one was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes every element equivalent to `value`, returning how many were removed.
    ///
    /// # Complexity
    ///
    /// O(count · log n)
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase_multi(value)
    }

    /// Removes and returns the earliest inserted element equivalent to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(value);
        if found.is_end() {
            return None;
        }
        Some(self.tree.erase(found).1)
    }

    /// Gets an iterator over the elements within `range`, in order.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if `start == end` and both bounds are excluded.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.range(range)
    }
}

impl<T, C: Compare<T>> RbMultiSet<T, C> {
    /// Adds a value, after any equivalent elements already present.
    ///
    /// # Panics
    ///
    /// Panics if the multiset is at [`RbTree::max_size`] or allocation fails.
    #[track_caller]
    pub fn insert(&mut self, value: T) {
        self.tree.insert_multi(value);
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the multiset is full or allocation fails; it is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<(), Error> {
        self.tree.try_insert_multi(value).map(|_| ())
    }
}

impl<T: Clone, C: Clone> Clone for RbMultiSet<T, C> {
    fn clone(&self) -> Self {
        RbMultiSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: Hash, C> Hash for RbMultiSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<T: PartialEq, C> PartialEq for RbMultiSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for RbMultiSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for RbMultiSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C> Ord for RbMultiSet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RbMultiSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for RbMultiSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for RbMultiSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Compare<T>> Extend<T> for RbMultiSet<T, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.insert_multi_iter(iter);
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for RbMultiSet<T, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbMultiSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C> IntoIterator for RbMultiSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a RbMultiSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
