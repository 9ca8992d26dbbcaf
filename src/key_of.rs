//! Key extraction: how a tree finds the key inside each stored value.
//!
//! Set-like trees store bare keys ([`Identity`]); map-like trees store
//! `(key, value)` pairs and order them by the first component ([`First`]).
//! The choice is a type parameter, resolved at compile time.

/// Projects the ordering key out of a stored value.
pub trait KeyOf<T> {
    /// The key type the tree's comparator orders.
    type Key: ?Sized;

    /// Returns the key of `value`.
    fn key(value: &T) -> &Self::Key;
}

/// Set semantics: a value is its own key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key(value: &T) -> &T {
        value
    }
}

/// Map semantics: the key is the first element of a pair.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct First;

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;

    #[inline]
    fn key(value: &(K, V)) -> &K {
        &value.0
    }
}
