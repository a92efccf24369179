/// A tandem-repeat profile: a stable external `key` plus the decoded
/// sequence of small integers that make up the repeat's consensus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub key: i64,
    pub indices: Vec<i32>,
}

impl Profile {
    pub fn new(key: i64, indices: Vec<i32>) -> Self {
        Profile { key, indices }
    }

    pub fn proflen(&self) -> usize {
        self.indices.len()
    }
}

/// A forward profile and its reverse-complement, read atomically from a
/// source. Both sides share `key` but own independent index sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePair {
    pub forward: Profile,
    pub reverse_complement: Profile,
}

impl ProfilePair {
    pub fn key(&self) -> i64 {
        self.forward.key
    }
}

/// The canonical, rotation- and strand-invariant key used to order and
/// deduplicate `ProfilePair`s. `rc_wins` is true iff the reverse-complement
/// side produced the minimum representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalKey {
    pub rep: Vec<i32>,
    pub rc_wins: bool,
}

impl CanonicalKey {
    pub fn minrlen(&self) -> usize {
        self.rep.len()
    }

    pub fn mark(&self) -> char {
        if self.rc_wins { '"' } else { '\'' }
    }
}
