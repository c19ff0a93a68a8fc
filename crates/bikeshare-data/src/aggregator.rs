//! Insertion-ordered frequency counting.
//!
//! Every "most common" figure in the reports comes from a [`FrequencyTable`].
//! Ties always resolve to the value that was seen first in table order, so a
//! mode is deterministic for a given row order.

use std::collections::HashMap;
use std::hash::Hash;

/// The most frequent value of a column and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode<K> {
    pub value: K,
    pub count: u64,
}

impl<K> Mode<K> {
    pub fn map<U>(self, f: impl FnOnce(K) -> U) -> Mode<U> {
        Mode {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Value counts that remember first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
    total: u64,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.total += 1;
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 += 1;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, 1));
    }

    pub fn count(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of observations added.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most frequent value; the first-seen value wins a tie. `None` when
    /// nothing was counted.
    pub fn mode(&self) -> Option<Mode<K>> {
        let mut best: Option<&(K, u64)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, count)| Mode {
            value: value.clone(),
            count: *count,
        })
    }

    /// All values by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(K, u64)> {
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order inside equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` highest-ranked values.
    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}
