use std::cmp::Ordering;

use crate::profile::CanonicalKey;

/// Total order over two index arrays: shorter sorts first; on equal length,
/// first differing element decides.
pub fn compare_indices(a: &[i32], b: &[i32]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

/// Compares two canonical keys. An absent key (a drained source's sentinel)
/// sorts greater than any present key.
pub fn compare_canonical(a: Option<&CanonicalKey>, b: Option<&CanonicalKey>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_indices(&a.rep, &b.rep),
    }
}
