use std::collections::HashMap;
use std::hash::Hash;

/// Frequency table that remembers the order in which keys were first seen.
#[derive(Debug, Clone)]
pub struct OrderedCounter<K> {
    order: Vec<K>,
    counts: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone> OrderedCounter<K> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Add one to `key`, starting from zero if unseen. Returns the new count.
    pub fn increment(&mut self, key: K) -> u64 {
        if let Some(count) = self.counts.get_mut(&key) {
            *count += 1;
            return *count;
        }
        self.order.push(key.clone());
        self.counts.insert(key, 1);
        1
    }

    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.order
            .iter()
            .map(move |key| (key, self.counts.get(key).copied().unwrap_or(0)))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for OrderedCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_from_zero() {
        let mut counter = OrderedCounter::new();
        assert_eq!(counter.get(&"sv_P1"), 0);
        assert_eq!(counter.increment("sv_P1"), 1);
        assert_eq!(counter.increment("sv_P1"), 2);
        assert_eq!(counter.get(&"sv_P1"), 2);
    }

    #[test]
    fn test_iteration_follows_first_seen_order() {
        let mut counter = OrderedCounter::new();
        for key in ["b", "a", "c", "a", "b", "a"] {
            counter.increment(key);
        }

        let entries: Vec<_> = counter.iter().map(|(k, v)| (*k, v)).collect();
        assert_eq!(entries, vec![("b", 2), ("a", 3), ("c", 1)]);
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.total(), 6);
    }

    #[test]
    fn test_empty_counter() {
        let counter: OrderedCounter<String> = OrderedCounter::default();
        assert!(counter.is_empty());
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.iter().count(), 0);
    }
}
