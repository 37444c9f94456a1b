//! Insertion-ordered frequency map.
//!
//! Rankings must break frequency ties by first-seen order, not by hash
//! order, so the map tracks the order in which keys first appeared
//! alongside their counts.

use std::collections::HashMap;
use std::hash::Hash;

/// Frequency counter that remembers first-insertion order.
///
/// Equality compares counts only: insertion order is presentation
/// metadata and must not break the commutativity of the merge algebra.
#[derive(Debug, Clone, Default)]
pub struct FreqMap<K: Eq + Hash + Clone> {
    counts: HashMap<K, u64>,
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone> FreqMap<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Increment the count of `key` by one.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Add `count` occurrences of `key`.
    pub fn add(&mut self, key: K, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(&key) {
            Some(existing) => *existing += count,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, count);
            }
        }
    }

    /// Current count of `key` (0 if absent).
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.order.iter().map(move |k| (k, self.counts[k]))
    }

    /// Fold `other`'s entries into this map, summing counts. Keys new to
    /// this map keep `other`'s relative first-seen order.
    pub fn merge_from(&mut self, other: &FreqMap<K>) {
        for (key, count) in other.iter() {
            self.add(key.clone(), count);
        }
    }

    /// The `n` highest-frequency entries in descending order, ties broken
    /// by first-insertion order.
    pub fn top_n(&self, n: usize) -> Vec<(K, u64)> {
        let mut ranked: Vec<(usize, &K, u64)> = self
            .order
            .iter()
            .enumerate()
            .map(|(idx, key)| (idx, key, self.counts[key]))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(_, key, count)| (key.clone(), count))
            .collect()
    }
}

impl<K: Eq + Hash + Clone> PartialEq for FreqMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<K: Eq + Hash + Clone> Eq for FreqMap<K> {}
