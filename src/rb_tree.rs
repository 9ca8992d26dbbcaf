use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Bound, RangeBounds};
#[cfg(target_has_atomic = "ptr")]
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use crate::compare::{Compare, Natural};
use crate::error::{Error, unwrap_insert};
use crate::key_of::KeyOf;
use crate::raw::{Handle, RawRbTree};

/// Identifies the tree a [`Position`] was taken from.
///
/// Targets without atomic read-modify-write give every tree the same id,
/// which turns the foreign-position check into a no-op there.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct TreeId(usize);

impl TreeId {
    #[cfg(target_has_atomic = "ptr")]
    fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        TreeId(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }

    #[cfg(not(target_has_atomic = "ptr"))]
    fn next() -> Self {
        TreeId(0)
    }
}

/// A bidirectional position in an [`RbTree`]: either an element or the end.
///
/// Positions compare by node identity. Inserting never invalidates a
/// position; erasing invalidates only the position of the erased element.
/// Using an invalidated position, or a position from another tree, is a logic
/// error: it panics where it can be detected (the latter only with debug
/// assertions enabled) and otherwise yields unspecified elements, but never
/// undefined behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    node: Option<Handle>,
    tree: TreeId,
}

impl Position {
    /// Returns true if this is the end position, one past the last element.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

/// A red-black tree ordered by a comparator `C` over keys extracted by `X`.
///
/// This is the engine behind [`RbSet`](crate::RbSet),
/// [`RbMultiSet`](crate::RbMultiSet), [`RbMap`](crate::RbMap) and
/// [`RbMultiMap`](crate::RbMultiMap). It exposes both flavors of insertion:
/// `*_unique` operations refuse keys equivalent to one already present, while
/// `*_multi` operations always insert, placing the new element after its
/// equals.
///
/// # Examples
///
/// ```
/// use rb_tree::{Identity, Natural, RbTree};
///
/// let mut tree: RbTree<i32, Identity, Natural> = RbTree::new();
/// for v in [10, 20, 5, 15, 3] {
///     tree.insert_unique(v);
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 5, 10, 15, 20]);
///
/// let (_, inserted) = tree.insert_unique(10);
/// assert!(!inserted);
///
/// tree.erase_unique(&10);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 5, 15, 20]);
/// ```
pub struct RbTree<T, X, C = Natural> {
    raw: RawRbTree<T>,
    cmp: C,
    id: TreeId,
    _key: PhantomData<fn() -> X>,
}

impl<T, X, C: Default> RbTree<T, X, C> {
    /// Makes a new, empty tree using the default comparator.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, X, C> RbTree<T, X, C> {
    /// Makes a new, empty tree ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        RbTree {
            raw: RawRbTree::new(),
            cmp,
            id: TreeId::next(),
            _key: PhantomData,
        }
    }

    /// Returns the tree's comparator.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The largest number of elements any tree can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        RawRbTree::<T>::max_size()
    }

    /// Removes every element.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents and comparators of two trees.
    ///
    /// Positions follow their elements: a position taken from `self` is
    /// valid in `other` afterwards.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        log::trace!("swapping red-black trees of {} and {} elements", self.len(), other.len());
        self.raw.swap(&mut other.raw);
        core::mem::swap(&mut self.cmp, &mut other.cmp);
        core::mem::swap(&mut self.id, &mut other.id);
    }

    #[inline]
    fn position(&self, node: Option<Handle>) -> Position {
        Position { node, tree: self.id }
    }

    #[inline]
    #[track_caller]
    fn check(&self, pos: Position) {
        debug_assert!(pos.tree == self.id, "`RbTree` - position belongs to a different tree!");
    }

    /// The position of the first element, or [`end`](Self::end) if empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position(self.raw.leftmost())
    }

    /// The position one past the last element.
    #[must_use]
    pub fn end(&self) -> Position {
        self.position(None)
    }

    /// The position of the last element, or [`end`](Self::end) if empty.
    #[must_use]
    pub fn last(&self) -> Position {
        self.position(self.raw.rightmost())
    }

    /// The position after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position.
    #[must_use]
    #[track_caller]
    pub fn next(&self, pos: Position) -> Position {
        self.check(pos);
        let h = pos.node.expect("`RbTree::next()` - cannot advance past the end position!");
        self.position(self.raw.successor(h))
    }

    /// The position before `pos`; the last element's position when `pos` is the end.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the first position.
    #[must_use]
    #[track_caller]
    pub fn prev(&self, pos: Position) -> Position {
        self.check(pos);
        let before = match pos.node {
            Some(h) => self.raw.predecessor(h),
            None => self.raw.rightmost(),
        };
        self.position(Some(before.expect("`RbTree::prev()` - cannot retreat before the first position!")))
    }

    /// The element at `pos`, or `None` at the end position.
    #[must_use]
    #[track_caller]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.check(pos);
        pos.node.map(|h| self.raw.value(h))
    }

    /// The element at `pos`, mutably. Callers must keep its key unchanged.
    #[track_caller]
    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.check(pos);
        pos.node.map(|h| self.raw.value_mut(h))
    }

    /// The first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.leftmost().map(|h| self.raw.value(h))
    }

    /// The last element, if any.
    #[must_use]
    pub fn last_value(&self) -> Option<&T> {
        self.raw.rightmost().map(|h| self.raw.value(h))
    }

    /// Number of positions from `first` up to, not including, `last`.
    ///
    /// # Complexity
    ///
    /// O(distance)
    #[track_caller]
    pub fn distance(&self, first: Position, last: Position) -> usize {
        self.range_positions(first, last).count()
    }

    /// Removes the element at `pos`, returning the position after it and the element.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[track_caller]
    pub fn erase(&mut self, pos: Position) -> (Position, T) {
        self.check(pos);
        let h = pos.node.expect("`RbTree::erase()` - cannot erase the end position!");
        let next = self.raw.successor(h);
        let value = self.raw.remove(h);
        (self.position(next), value)
    }

    /// Removes every element in `[first, last)`, returning `last`.
    ///
    /// # Complexity
    ///
    /// O(k log n) for k erased elements; O(n) when erasing everything.
    #[track_caller]
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.check(first);
        self.check(last);
        if first == self.begin() && last.is_end() {
            self.clear();
            return self.end();
        }

        let mut current = first;
        while current != last {
            current = self.erase(current).0;
        }
        last
    }

    /// Removes and returns the first element.
    pub fn take_first(&mut self) -> Option<T> {
        let h = self.raw.leftmost()?;
        Some(self.raw.remove(h))
    }

    /// Removes and returns the last element.
    pub fn take_last(&mut self) -> Option<T> {
        let h = self.raw.rightmost()?;
        Some(self.raw.remove(h))
    }

    /// Gets an iterator over the elements in order.
    ///
    /// The iterator is double-ended; `.rev()` walks from the last element.
    ///
    /// # Complexity
    ///
    /// O(1) to create; each step is amortized O(1) via parent links.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            span: Span {
                tree: &self.raw,
                front: self.raw.leftmost(),
                back: self.raw.rightmost(),
            },
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the elements in `[first, last)`.
    #[track_caller]
    pub fn range_positions(&self, first: Position, last: Position) -> Range<'_, T> {
        self.check(first);
        self.check(last);
        let span = if first == last {
            Span::empty(&self.raw)
        } else {
            Span {
                tree: &self.raw,
                front: first.node,
                back: Some(self.prev(last)).and_then(|p| p.node),
            }
        };
        Range { span }
    }

    /// Gets a raw mutable walker over every element, for value-only mutation.
    pub(crate) fn iter_mut_raw(&mut self) -> IterMutRaw<'_, T> {
        IterMutRaw {
            front: self.raw.leftmost(),
            back: self.raw.rightmost(),
            remaining: self.raw.len(),
            tree: &raw mut self.raw,
            _marker: PhantomData,
        }
    }

    /// Keeps only the elements for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut current = self.raw.leftmost();
        while let Some(h) = current {
            current = self.raw.successor(h);
            if !keep(self.raw.value_mut(h)) {
                self.raw.remove(h);
            }
        }
    }
}

impl<T, X, C> RbTree<T, X, C>
where
    X: KeyOf<T>,
{
    /// First position whose key is not less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.position(self.raw.lower_bound_by(|v| self.cmp.less(X::key(v).borrow(), key)))
    }

    /// First position whose key is greater than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.position(self.raw.upper_bound_by(|v| self.cmp.less(key, X::key(v).borrow())))
    }

    /// The position of the first element with a key equivalent to `key`, or the end.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.position(self.raw.find_by(
            |v| self.cmp.less(X::key(v).borrow(), key),
            |v| self.cmp.less(key, X::key(v).borrow()),
        ))
    }

    /// Returns true if some element has a key equivalent to `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        !self.find(key).is_end()
    }

    /// The positions bracketing every element equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn equal_range_multi<Q>(&self, key: &Q) -> (Position, Position)
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Like [`equal_range_multi`](Self::equal_range_multi) for trees with
    /// unique keys: a single search finds at most one element.
    pub fn equal_range_unique<Q>(&self, key: &Q) -> (Position, Position)
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.find(key);
        if found.is_end() { (found, found) } else { (found, self.next(found)) }
    }

    /// Number of elements equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n + count)
    pub fn count_multi<Q>(&self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.equal_range_multi(key);
        self.distance(first, last)
    }

    /// 1 if an element equivalent to `key` is present, 0 otherwise.
    pub fn count_unique<Q>(&self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains(key))
    }

    /// Removes the element equivalent to `key`, returning how many were removed (0 or 1).
    pub fn erase_unique<Q>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.find(key);
        if found.is_end() {
            return 0;
        }
        self.erase(found);
        1
    }

    /// Removes every element equivalent to `key`, returning how many were removed.
    pub fn erase_multi<Q>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.equal_range_multi(key);
        let count = self.distance(first, last);
        self.erase_range(first, last);
        count
    }

    /// Gets an iterator over the elements whose keys fall in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range starts after it ends, or if it starts and ends at
    /// the same excluded key.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
            (range.start_bound(), range.end_bound())
        {
            let both_excluded =
                matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_));
            let valid = if both_excluded { self.cmp.less(start, end) } else { !self.cmp.less(end, start) };
            assert!(valid, "range start is greater than range end in RbTree");
        }

        let first = match range.start_bound() {
            Bound::Included(start) => self.lower_bound(start),
            Bound::Excluded(start) => self.upper_bound(start),
            Bound::Unbounded => self.begin(),
        };
        let last = match range.end_bound() {
            Bound::Included(end) => self.upper_bound(end),
            Bound::Excluded(end) => self.lower_bound(end),
            Bound::Unbounded => self.end(),
        };
        self.range_positions(first, last)
    }
}

impl<T, X, C> RbTree<T, X, C>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
{
    /// Inserts `value` unless an equivalent key is present.
    ///
    /// Returns the position of the new element and `true`, or the position of
    /// the element that blocked the insertion and `false`. On error the tree
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] if the tree is full,
    /// [`Error::AllocFailed`] if node storage cannot be allocated.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn try_insert_unique(&mut self, value: T) -> Result<(Position, bool), Error> {
        let slot = {
            let key = X::key(&value);
            self.raw.unique_position(|v| self.cmp.less(key, X::key(v)), |v| self.cmp.less(X::key(v), key))
        };
        match slot {
            Ok((parent, add_to_left)) => self.link(parent, add_to_left, value).map(|pos| (pos, true)),
            Err(existing) => Ok((self.position(Some(existing)), false)),
        }
    }

    /// Inserts `value` after any elements with equivalent keys.
    ///
    /// # Errors
    ///
    /// As for [`try_insert_unique`](Self::try_insert_unique).
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn try_insert_multi(&mut self, value: T) -> Result<Position, Error> {
        let (parent, add_to_left) = {
            let key = X::key(&value);
            self.raw.multi_position(|v| self.cmp.less(key, X::key(v)))
        };
        self.link(parent, add_to_left, value)
    }

    /// Inserts `value` unless an equivalent key is present, using `hint` as
    /// the position the value probably goes just before.
    ///
    /// A correct hint saves the descent from the root; a wrong one costs two
    /// comparisons before falling back to [`try_insert_unique`](Self::try_insert_unique).
    ///
    /// # Errors
    ///
    /// As for [`try_insert_unique`](Self::try_insert_unique).
    #[track_caller]
    pub fn try_insert_unique_hint(&mut self, hint: Position, value: T) -> Result<(Position, bool), Error> {
        self.check(hint);
        let slot = {
            let key = X::key(&value);
            self.raw.unique_hint_position(
                hint.node,
                |v| self.cmp.less(key, X::key(v)),
                |v| self.cmp.less(X::key(v), key),
            )
        };
        match slot {
            Ok(Some((parent, add_to_left))) => self.link(parent, add_to_left, value).map(|pos| (pos, true)),
            Ok(None) => self.try_insert_unique(value),
            Err(existing) => Ok((self.position(Some(existing)), false)),
        }
    }

    /// Inserts `value` after any equivalent keys, using `hint` as the
    /// position the value probably goes just before.
    ///
    /// # Errors
    ///
    /// As for [`try_insert_unique`](Self::try_insert_unique).
    #[track_caller]
    pub fn try_insert_multi_hint(&mut self, hint: Position, value: T) -> Result<Position, Error> {
        self.check(hint);
        let (parent, add_to_left) = {
            let key = X::key(&value);
            let key_below = |v: &T| self.cmp.less(key, X::key(v));
            self.raw
                .multi_hint_position(hint.node, key_below)
                .unwrap_or_else(|| self.raw.multi_position(key_below))
        };
        self.link(parent, add_to_left, value)
    }

    /// Inserts every value whose key is not yet present, returning how many were inserted.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] before anything is inserted if the
    /// iterator's lower size bound cannot fit; otherwise as for
    /// [`try_insert_unique`](Self::try_insert_unique), with the values
    /// inserted before the failure kept.
    pub fn try_insert_unique_iter<I>(&mut self, values: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        self.check_room(values.size_hint().0)?;
        let mut inserted = 0;
        for value in values {
            let end = self.end();
            if self.try_insert_unique_hint(end, value)?.1 {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Inserts every value, keeping equal keys in arrival order.
    ///
    /// # Errors
    ///
    /// As for [`try_insert_unique_iter`](Self::try_insert_unique_iter).
    pub fn try_insert_multi_iter<I>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        self.check_room(values.size_hint().0)?;
        for value in values {
            let end = self.end();
            self.try_insert_multi_hint(end, value)?;
        }
        Ok(())
    }

    /// Infallible [`try_insert_unique`](Self::try_insert_unique).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_unique(&mut self, value: T) -> (Position, bool) {
        unwrap_insert(self.try_insert_unique(value))
    }

    /// Infallible [`try_insert_multi`](Self::try_insert_multi).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_multi(&mut self, value: T) -> Position {
        unwrap_insert(self.try_insert_multi(value))
    }

    /// Infallible [`try_insert_unique_hint`](Self::try_insert_unique_hint).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_unique_hint(&mut self, hint: Position, value: T) -> (Position, bool) {
        unwrap_insert(self.try_insert_unique_hint(hint, value))
    }

    /// Infallible [`try_insert_multi_hint`](Self::try_insert_multi_hint).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_multi_hint(&mut self, hint: Position, value: T) -> Position {
        unwrap_insert(self.try_insert_multi_hint(hint, value))
    }

    /// Infallible [`try_insert_unique_iter`](Self::try_insert_unique_iter).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_unique_iter<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize {
        unwrap_insert(self.try_insert_unique_iter(values))
    }

    /// Infallible [`try_insert_multi_iter`](Self::try_insert_multi_iter).
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or allocation fails.
    #[track_caller]
    pub fn insert_multi_iter<I: IntoIterator<Item = T>>(&mut self, values: I) {
        unwrap_insert(self.try_insert_multi_iter(values));
    }

    fn check_room(&self, additional: usize) -> Result<(), Error> {
        if additional > self.max_size() - self.len() {
            log::debug!("refusing to insert {additional} elements into a tree of {}", self.len());
            return Err(Error::CapacityOverflow { max: self.max_size() });
        }
        Ok(())
    }

    fn link(&mut self, parent: Option<Handle>, add_to_left: bool, value: T) -> Result<Position, Error> {
        let h = self
            .raw
            .insert_at(parent, add_to_left, value)
            .inspect_err(|err| log::debug!("insertion refused: {err}"))?;
        Ok(self.position(Some(h)))
    }
}

impl<T: Clone, X, C: Clone> Clone for RbTree<T, X, C> {
    /// Deep-copies the tree, reproducing its exact shape and colors.
    ///
    /// Positions of the source are not valid in the copy.
    fn clone(&self) -> Self {
        RbTree {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
            id: TreeId::next(),
            _key: PhantomData,
        }
    }

    /// Replaces the contents with a deep copy of `source`.
    ///
    /// Positions previously taken from `self` are invalidated.
    fn clone_from(&mut self, source: &Self) {
        self.raw = source.raw.clone();
        self.cmp.clone_from(&source.cmp);
        self.id = TreeId::next();
    }
}

impl<T, X: KeyOf<T>, C: Compare<X::Key>> Extend<T> for RbTree<T, X, C> {
    /// Inserts every value with [`insert_multi`](RbTree::insert_multi) semantics.
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_multi_iter(iter);
    }
}

impl<T, X, C: Default> Default for RbTree<T, X, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, X, C> fmt::Debug for RbTree<T, X, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, X, C> PartialEq for RbTree<T, X, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, X, C> Eq for RbTree<T, X, C> {}

impl<T: PartialOrd, X, C> PartialOrd for RbTree<T, X, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, X, C> Ord for RbTree<T, X, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, X, C> Hash for RbTree<T, X, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<'a, T, X, C> IntoIterator for &'a RbTree<T, X, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, X, C> IntoIterator for RbTree<T, X, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an owning iterator over the elements in order.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

/// An inclusive walk between two nodes; both ends `None` once exhausted.
struct Span<'a, T> {
    tree: &'a RawRbTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<'a, T> Span<'a, T> {
    const fn empty(tree: &'a RawRbTree<T>) -> Self {
        Span {
            tree,
            front: None,
            back: None,
        }
    }

    fn next(&mut self) -> Option<&'a T> {
        let h = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(h);
        }
        Some(self.tree.value(h))
    }

    fn next_back(&mut self) -> Option<&'a T> {
        let h = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(h);
        }
        Some(self.tree.value(h))
    }
}

impl<T> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        Span {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

/// An iterator over the elements of an [`RbTree`], in order.
///
/// This `struct` is created by the [`iter`](RbTree::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    span: Span<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.span.next()?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let value = self.span.next_back()?;
        self.remaining -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            span: self.span.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a sub-range of an [`RbTree`], in order.
///
/// This `struct` is created by [`range`](RbTree::range) and
/// [`range_positions`](RbTree::range_positions).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T> {
    span: Span<'a, T>,
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.span.next()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.span.next_back()
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            span: self.span.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the elements of an [`RbTree`], in order.
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

/// Mutable in-order walk over every element; backs the maps' `iter_mut`.
pub(crate) struct IterMutRaw<'a, T> {
    tree: *mut RawRbTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: IterMutRaw behaves as &mut RawRbTree<T>.
unsafe impl<T: Send> Send for IterMutRaw<'_, T> {}
unsafe impl<T: Sync> Sync for IterMutRaw<'_, T> {}

impl<'a, T> Iterator for IterMutRaw<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.front?;
        self.remaining -= 1;

        // SAFETY: `tree` comes from a live `&'a mut` borrow. Walking reads only the
        // link arena, which shares no memory with yielded elements, and each handle is
        // yielded at most once because `remaining` bounds the walk from both ends.
        unsafe {
            let tree = &*self.tree;
            self.front = tree.successor(h);
            Some(RawRbTree::value_mut_ptr(self.tree, h))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMutRaw<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.back?;
        self.remaining -= 1;

        // SAFETY: As in `next`.
        unsafe {
            let tree = &*self.tree;
            self.back = tree.predecessor(h);
            Some(RawRbTree::value_mut_ptr(self.tree, h))
        }
    }
}

impl<T> ExactSizeIterator for IterMutRaw<'_, T> {}

impl<T> FusedIterator for IterMutRaw<'_, T> {}
