//! Keyed debounce queue for settle events.
//!
//! A fast flick can report several settles in a row. Each key keeps only
//! its latest value; it becomes ready once no newer value arrived within
//! the debounce window.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Pending<V> {
    value: V,
    debounce_until_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Debouncer<K, V> {
    window_ms: u64,
    pending: HashMap<K, Pending<V>>,
}

impl<K: Eq + Hash + Clone, V: Clone> Debouncer<K, V> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: HashMap::new(),
        }
    }

    /// Record `value` for `key`, superseding anything still pending for it.
    pub fn push(&mut self, key: K, value: V, now_ms: u64) {
        self.pending.insert(
            key,
            Pending {
                value,
                debounce_until_ms: now_ms.saturating_add(self.window_ms),
            },
        );
    }

    /// Remove and return every entry whose window has elapsed.
    pub fn drain_ready(&mut self, now_ms: u64) -> Vec<(K, V)> {
        let mut ready = Vec::new();
        self.pending.retain(|key, pending| {
            if pending.debounce_until_ms <= now_ms {
                ready.push((key.clone(), pending.value.clone()));
                false
            } else {
                true
            }
        });
        ready
    }

    /// Earliest time at which something becomes ready.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.values().map(|p| p.debounce_until_ms).min()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_value_wins() {
        let mut debouncer = Debouncer::new(80);
        debouncer.push("main", 3, 1_000);
        debouncer.push("main", 4, 1_030);
        assert!(debouncer.drain_ready(1_100).is_empty());
        assert_eq!(debouncer.drain_ready(1_110), vec![("main", 4)]);
        assert!(debouncer.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let mut debouncer = Debouncer::new(50);
        debouncer.push("main", 1, 0);
        debouncer.push("sticky", 2, 20);
        assert_eq!(debouncer.next_due_ms(), Some(50));
        assert_eq!(debouncer.drain_ready(50), vec![("main", 1)]);
        assert_eq!(debouncer.drain_ready(70), vec![("sticky", 2)]);
    }

    #[test]
    fn zero_window_is_ready_immediately() {
        let mut debouncer = Debouncer::new(0);
        debouncer.push(1u8, "x", 10);
        assert_eq!(debouncer.drain_ready(10), vec![(1u8, "x")]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut debouncer = Debouncer::new(50);
        debouncer.push(1u8, 1, 0);
        debouncer.push(2u8, 2, 0);
        debouncer.clear();
        assert!(debouncer.is_empty());
        assert_eq!(debouncer.next_due_ms(), None);
        assert!(debouncer.drain_ready(1_000).is_empty());
    }
}
