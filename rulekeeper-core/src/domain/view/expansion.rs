// rulekeeper-core/src/domain/view/expansion.rs

use std::collections::HashMap;
use std::hash::Hash;

/// Open/closed toggles for collapsible panels (sample rows per expectation).
#[derive(Debug, Clone)]
pub struct Expansion<K> {
    open: HashMap<K, bool>,
}

impl<K> Default for Expansion<K> {
    fn default() -> Self {
        Self {
            open: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Expansion<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `key`; returns the new state.
    pub fn toggle(&mut self, key: K) -> bool {
        let state = self.open.entry(key).or_insert(false);
        *state = !*state;
        *state
    }

    pub fn is_expanded(&self, key: &K) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }
}
