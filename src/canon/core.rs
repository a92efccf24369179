use std::cmp::Ordering;

use crate::profile::{CanonicalKey, ProfilePair};

use super::compare::compare_indices;

/// Lexicographically smallest rotation of `arr`, by naive O(n^2) scan.
/// Acceptable per the documented complexity freedom: profiles are short.
fn min_rotation(arr: &[i32]) -> Vec<i32> {
    if arr.is_empty() {
        return Vec::new();
    }
    let len = arr.len();
    let mut best: Vec<i32> = arr.to_vec();
    for start in 1..len {
        let candidate: Vec<i32> = arr[start..].iter().chain(arr[..start].iter()).copied().collect();
        if candidate < best {
            best = candidate;
        }
    }
    best
}

/// Computes the canonical key for a profile pair.
///
/// When `identical_only` is set, no rotation search is performed: the
/// forward and reverse-complement arrays are compared as-is. Otherwise the
/// minimal rotation of each side is computed independently, each using its
/// own length, the corrected reading of the rotation bound. The
/// original program's RC rotation loop bounded on the forward length
/// instead (see `rc_rotation_uses_own_length` below).
///
/// Ties keep the forward side; `rc_wins` is set only when the RC side is
/// strictly smaller.
pub fn canonicalize(pair: &ProfilePair, identical_only: bool) -> CanonicalKey {
    if identical_only {
        let cmp = compare_indices(&pair.forward.indices, &pair.reverse_complement.indices);
        return match cmp {
            Ordering::Greater => CanonicalKey {
                rep: pair.reverse_complement.indices.clone(),
                rc_wins: true,
            },
            _ => CanonicalKey {
                rep: pair.forward.indices.clone(),
                rc_wins: false,
            },
        };
    }

    let fwd_min = min_rotation(&pair.forward.indices);
    let rc_min = min_rotation(&pair.reverse_complement.indices);
    match compare_indices(&fwd_min, &rc_min) {
        Ordering::Greater => CanonicalKey {
            rep: rc_min,
            rc_wins: true,
        },
        _ => CanonicalKey {
            rep: fwd_min,
            rc_wins: false,
        },
    }
}
