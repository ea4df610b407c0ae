//! Held-key bookkeeping for gated traversal.

use std::collections::BTreeSet;

use crate::types::{KeyId, TileKind};

/// Keys the traveler holds. Only ever grows during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    held: BTreeSet<KeyId>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: KeyId) -> bool {
        self.held.contains(&key)
    }

    /// Returns true if the key was not held before.
    pub fn insert(&mut self, key: KeyId) -> bool {
        self.held.insert(key)
    }

    /// Scratch copy with `key` added; `self` is left untouched.
    pub fn with(&self, key: KeyId) -> KeySet {
        let mut scratch = self.clone();
        scratch.held.insert(key);
        scratch
    }

    pub fn unlocks(&self, kind: TileKind) -> bool {
        match kind {
            TileKind::Plain => true,
            TileKind::Wall => false,
            TileKind::Gated(key) => self.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.held.iter().copied()
    }
}

impl FromIterator<KeyId> for KeySet {
    fn from_iter<I: IntoIterator<Item = KeyId>>(iter: I) -> Self {
        Self { held: iter.into_iter().collect() }
    }
}
