//! Presence-aware equivalence primitives.
//!
//! Total functions used before dereferencing optional values, so comparison
//! code never has to unwrap either side.

use std::collections::BTreeMap;

/// Returns true iff exactly one of the two optional values is absent.
///
/// Content is ignored; this only detects a presence asymmetry.
#[must_use]
pub fn has_presence_difference<T>(a: Option<&T>, b: Option<&T>) -> bool {
    a.is_some() != b.is_some()
}

/// Returns true iff both slices hold the same elements in the same order.
///
/// An absent slice compares equal to an empty one.
#[must_use]
pub fn slices_equal<T: PartialEq>(a: Option<&[T]>, b: Option<&[T]>) -> bool {
    a.unwrap_or_default() == b.unwrap_or_default()
}

/// Returns true iff both maps hold the same keys with equal values.
///
/// An absent map compares equal to an empty one.
#[must_use]
pub fn maps_equal<K: Ord, V: PartialEq>(
    a: Option<&BTreeMap<K, V>>,
    b: Option<&BTreeMap<K, V>>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (Some(m), None) | (None, Some(m)) => m.is_empty(),
        (None, None) => true,
    }
}
