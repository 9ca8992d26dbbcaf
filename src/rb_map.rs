//! Ordered maps: [`RbMap`] with unique keys and [`RbMultiMap`] allowing duplicate keys.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem;
use core::ops::{Index, RangeBounds};

use crate::compare::{Compare, Natural};
use crate::error::Error;
use crate::key_of::First;
use crate::rb_tree::{self, IterMutRaw, RbTree};

/// An ordered map based on a red-black tree.
///
/// Entries are stored as `(K, V)` pairs sorted by key under the comparator
/// `C`, which defaults to the keys' [`Ord`] order. Each key appears at most
/// once.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rb_tree::RbMap;
///
/// let mut movie_reviews = RbMap::new();
///
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// if !movie_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.", movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
///
/// assert_eq!(movie_reviews["Pulp Fiction"], "Masterpiece.");
/// ```
pub struct RbMap<K, V, C = Natural> {
    tree: RbTree<(K, V), First, C>,
}

/// An ordered multimap based on a red-black tree.
///
/// Like [`RbMap`], but a key may map to several values. Entries with
/// equivalent keys are kept in insertion order.
///
/// # Examples
///
/// ```
/// use rb_tree::RbMultiMap;
///
/// let mut index = RbMultiMap::new();
/// index.insert("rust", 1);
/// index.insert("tree", 2);
/// index.insert("rust", 3);
///
/// assert_eq!(index.count("rust"), 2);
/// assert_eq!(index.get_all("rust").copied().collect::<Vec<_>>(), [1, 3]);
/// assert_eq!(index.get("rust"), Some(&1));
///
/// assert_eq!(index.remove_all("rust"), 2);
/// assert_eq!(index.len(), 1);
/// ```
pub struct RbMultiMap<K, V, C = Natural> {
    tree: RbTree<(K, V), First, C>,
}

impl<K, V> RbMap<K, V> {
    /// Makes a new, empty `RbMap`.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub fn new() -> Self {
        RbMap { tree: RbTree::new() }
    }
}

impl<K, V, C> RbMap<K, V, C> {
    /// Makes a new, empty `RbMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::{RbMap, Reversed};
    ///
    /// let mut map = RbMap::with_comparator(Reversed);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.first_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        RbMap {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Returns the underlying tree, for position-based access.
    pub const fn as_tree(&self) -> &RbTree<(K, V), First, C> {
        &self.tree
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the first key-value pair in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// Returns the last key-value pair in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_value().map(|(k, v)| (k, v))
    }

    /// Removes and returns the first entry in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let mut map = RbMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.take_first()
    }

    /// Removes and returns the last entry in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.take_last()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.tree.iter() }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let mut map = RbMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.tree.iter_mut_raw(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Retains only the entries specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let mut map: RbMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.tree.retain(|(k, v)| f(k, v));
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(key)).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(key)).map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(key);
        self.tree.get_mut(found).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(key)
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(key);
        if found.is_end() {
            return None;
        }
        Some(self.tree.erase(found).1)
    }

    /// Gets an iterator over the entries whose keys fall in `range`.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if `start == end` and both bounds are excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let map = RbMap::from([(3, "a"), (5, "b"), (8, "c")]);
    /// let hits: Vec<_> = map.range(4..=8).collect();
    /// assert_eq!(hits, [(&5, &"b"), (&8, &"c")]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        Range {
            inner: self.tree.range(range),
        }
    }
}

impl<K, V, C: Compare<K>> RbMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. If it
    /// did, the value is updated and the old value returned; the stored key
    /// is kept.
    ///
    /// # Panics
    ///
    /// Panics if the map is at [`RbTree::max_size`] or allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_tree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let pos = self.tree.lower_bound(&key);
        let present = self.tree.get(pos).is_some_and(|(k, _)| !self.tree.comparator().less(&key, k));
        if present {
            return self.tree.get_mut(pos).map(|entry| mem::replace(&mut entry.1, value));
        }
        self.tree.insert_unique_hint(pos, (key, value));
        None
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if a new entry is needed and the map is full or
    /// allocation fails; the map is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let pos = self.tree.lower_bound(&key);
        let present = self.tree.get(pos).is_some_and(|(k, _)| !self.tree.comparator().less(&key, k));
        if present {
            return Ok(self.tree.get_mut(pos).map(|entry| mem::replace(&mut entry.1, value)));
        }
        self.tree.try_insert_unique_hint(pos, (key, value)).map(|_| None)
    }
}

impl<K, V> RbMultiMap<K, V> {
    /// Makes a new, empty `RbMultiMap`.
    #[must_use]
    pub fn new() -> Self {
        RbMultiMap { tree: RbTree::new() }
    }
}

impl<K, V, C> RbMultiMap<K, V, C> {
    /// Makes a new, empty `RbMultiMap` ordered by `cmp`.
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        RbMultiMap {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Returns the underlying tree, for position-based access.
    pub const fn as_tree(&self) -> &RbTree<(K, V), First, C> {
        &self.tree
    }

    /// Returns the number of entries, counting every value of a repeated key.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multimap contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The first entry; the earliest inserted among equal keys.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// The last entry; the latest inserted among equal keys.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_value().map(|(k, v)| (k, v))
    }

    /// Removes and returns the first entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.take_first()
    }

    /// Removes and returns the last entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.take_last()
    }

    /// Gets an iterator over every entry, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.tree.iter() }
    }

    /// Gets a mutable iterator over every entry, sorted by key.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.tree.iter_mut_raw(),
        }
    }

    /// Gets an iterator over the keys, repeated once per value.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Retains only the entries specified by the predicate.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.tree.retain(|(k, v)| f(k, v));
    }

    /// The earliest inserted value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(key)).map(|(_, v)| v)
    }

    /// The earliest inserted value for `key`, mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(key);
        self.tree.get_mut(found).map(|(_, v)| v)
    }

    /// Gets an iterator over every value for `key`, in insertion order.
    ///
    /// # Complexity
    ///
    /// O(log n) to create.
    pub fn get_all<Q>(&self, key: &Q) -> GetAll<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        GetAll {
            inner: self.equal_range(key),
        }
    }

    /// Gets an iterator over every entry whose key is equivalent to `key`.
    pub fn equal_range<Q>(&self, key: &Q) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let (first, last) = self.tree.equal_range_multi(key);
        Range {
            inner: self.tree.range_positions(first, last),
        }
    }

    /// Returns `true` if at least one entry has the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(key)
    }

    /// Number of values stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n + count)
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count_multi(key)
    }

    /// Removes the earliest inserted entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the earliest inserted entry for `key`, returning it.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let found = self.tree.find(key);
        if found.is_end() {
            return None;
        }
        Some(self.tree.erase(found).1)
    }

    /// Removes every entry for `key`, returning how many were removed.
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase_multi(key)
    }

    /// Gets an iterator over the entries whose keys fall in `range`.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if `start == end` and both bounds are excluded.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        Range {
            inner: self.tree.range(range),
        }
    }
}

impl<K, V, C: Compare<K>> RbMultiMap<K, V, C> {
    /// Inserts an entry after any entries with an equivalent key.
    ///
    /// # Panics
    ///
    /// Panics if the multimap is at [`RbTree::max_size`] or allocation fails.
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) {
        self.tree.insert_multi((key, value));
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the multimap is full or allocation fails; it is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), Error> {
        self.tree.try_insert_multi((key, value)).map(|_| ())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RbMap<K, V, C> {
    fn clone(&self) -> Self {
        RbMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RbMultiMap<K, V, C> {
    fn clone(&self) -> Self {
        RbMultiMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Hash, V: Hash, C> Hash for RbMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K: Hash, V: Hash, C> Hash for RbMultiMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RbMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RbMultiMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for RbMap<K, V, C> {}

impl<K: Eq, V: Eq, C> Eq for RbMultiMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for RbMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for RbMultiMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C> Ord for RbMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C> Ord for RbMultiMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbMultiMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for RbMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Default> Default for RbMultiMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, Q, V, C> Index<&Q> for RbMap<K, V, C>
where
    K: Borrow<Q>,
    C: Compare<Q>,
    Q: ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for RbMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for RbMultiMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for RbMap<K, V, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for RbMultiMap<K, V, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.insert_multi_iter(iter);
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for RbMap<K, V, C> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbMultiMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, V, C> IntoIterator for RbMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<K, V, C> IntoIterator for RbMultiMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbMultiMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RbMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RbMultiMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

/// An iterator over the entries of a map, sorted by key.
///
/// This `struct` is created by the `iter` method on [`RbMap`] and [`RbMultiMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: rb_tree::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over the entries of a map, sorted by key.
///
/// This `struct` is created by the `iter_mut` method on [`RbMap`] and [`RbMultiMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: IterMutRaw<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(|entry| (&entry.0, &mut entry.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next_back().map(|entry| (&entry.0, &mut entry.1))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.inner.len()).finish()
    }
}

/// An iterator over the keys of a map.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a map, in order by key.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over the values of a map, in order by key.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}

/// An iterator over a sub-range of entries in a map.
///
/// This `struct` is created by the `range` method on [`RbMap`] and
/// [`RbMultiMap`], and by [`RbMultiMap::equal_range`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    inner: rb_tree::Range<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over every value stored under one key of an [`RbMultiMap`].
///
/// This `struct` is created by [`RbMultiMap::get_all`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct GetAll<'a, K, V> {
    inner: Range<'a, K, V>,
}

impl<'a, K, V> Iterator for GetAll<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, K, V> DoubleEndedIterator for GetAll<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> FusedIterator for GetAll<'_, K, V> {}

impl<K, V> Clone for GetAll<'_, K, V> {
    fn clone(&self) -> Self {
        GetAll {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for GetAll<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the entries of a map, sorted by key.
pub struct IntoIter<K, V> {
    inner: rb_tree::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
