use alloc::collections::TryReserveError;
use core::fmt;

/// The error type for fallible insertions.
///
/// Both variants are reported before the tree is touched: when an insertion
/// fails, the tree is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The tree already holds the largest number of elements it can represent.
    CapacityOverflow {
        /// The maximum number of elements a tree can hold.
        max: usize,
    },
    /// The allocator could not provide storage for a new node.
    AllocFailed(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityOverflow { max } => write!(f, "tree is at maximum capacity ({max} elements)"),
            Error::AllocFailed(err) => write!(f, "node allocation failed: {err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::CapacityOverflow { .. } => None,
            Error::AllocFailed(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::AllocFailed(err)
    }
}

/// Unwraps the result of an infallible-looking insertion.
///
/// Mirrors the standard collections, which panic on capacity overflow.
#[inline]
#[track_caller]
pub(crate) fn unwrap_insert<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
