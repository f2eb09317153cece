//! Common ID Types
//!
//! Type-safe wrappers around the positive integer identities the store
//! assigns. An id of `0` means "not yet persisted"; negative values only ever
//! come from untrusted input and are rejected by the validators.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::from_raw(7);
/// assert!(id.is_assigned());
/// assert!(!UserId::unassigned().is_assigned());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Id of a record that has not been stored yet.
    pub const fn unassigned() -> Self {
        Self::from_raw(0)
    }

    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(&self) -> i64 {
        self.value
    }

    /// True when the id is strictly greater than `n`.
    pub const fn is_greater_than(&self, n: i64) -> bool {
        self.value > n
    }

    /// Ids handed out by a store are always positive.
    pub const fn is_assigned(&self) -> bool {
        self.is_greater_than(0)
    }
}

// Manual impls so that markers don't need to implement anything.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Gallery IDs
    pub struct Gallery;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type GalleryId = Id<markers::Gallery>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_is_zero() {
        let id = UserId::unassigned();
        assert_eq!(id.get(), 0);
        assert!(!id.is_assigned());
        assert_eq!(id, UserId::default());
    }

    #[test]
    fn test_negative_is_not_assigned() {
        assert!(!GalleryId::from_raw(-3).is_assigned());
        assert!(GalleryId::from_raw(1).is_assigned());
    }

    #[test]
    fn test_serde_as_plain_integer() {
        let id = GalleryId::from_raw(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: GalleryId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
