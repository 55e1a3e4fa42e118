//! Queue + seen-set for breadth-first exploration.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A FIFO queue that never admits the same key twice.
///
/// Each entry is a key (deduplicated over the whole lifetime of the queue,
/// not just its current contents) plus a payload carried along with it.
/// Popping an entry does not make its key admissible again.
#[derive(Debug)]
pub struct BfsQueue<K, V> {
    queue: VecDeque<(K, V)>,
    seen: HashSet<K>,
}

impl<K: Eq + Hash + Clone, V> Default for BfsQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> BfsQueue<K, V> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    /// Enqueues `key` with its payload unless the key was seen before.
    ///
    /// Returns `true` if the entry was added.
    pub fn push(&mut self, key: K, value: V) -> bool {
        if self.seen.insert(key.clone()) {
            self.queue.push_back((key, value));
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<(K, V)> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of entries waiting in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct keys ever admitted.
    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = BfsQueue::new();
        assert!(queue.push(1, 'a'));
        assert!(queue.push(2, 'b'));
        assert_eq!(queue.pop(), Some((1, 'a')));
        assert_eq!(queue.pop(), Some((2, 'b')));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_keys_are_admitted_once() {
        let mut queue = BfsQueue::new();
        assert!(queue.push("x", 0));
        assert!(!queue.push("x", 1));
        assert_eq!(queue.pop(), Some(("x", 0)));
        // Still rejected after being popped.
        assert!(!queue.push("x", 2));
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.seen(), 1);
    }
}
