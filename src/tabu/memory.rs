//! Bounded recency memory.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Bounded FIFO of recently visited states or moves.
///
/// Holds at most `capacity` entries; pushing onto a full list evicts the
/// oldest entry. Membership is answered in O(1) through a multiplicity
/// map kept alongside the queue, so the same entry may be queued more
/// than once and stays tabu until its last copy is evicted.
///
/// Stores whole candidates for [`TabuRunner::run`](super::TabuRunner::run)
/// and move signatures for
/// [`TabuRunner::run_feature_based`](super::TabuRunner::run_feature_based).
///
/// # Examples
///
/// ```
/// use metaheur::tabu::TabuList;
///
/// let mut tabu = TabuList::new(2);
/// tabu.push(1);
/// tabu.push(2);
/// tabu.push(3);
/// assert!(!tabu.contains(&1));
/// assert!(tabu.contains(&2) && tabu.contains(&3));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList<T: Eq + Hash> {
    queue: VecDeque<T>,
    counts: HashMap<T, usize>,
    capacity: usize,
}

impl<T: Clone + Eq + Hash> TabuList<T> {
    /// Creates an empty list. A capacity of zero forbids nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            counts: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.counts.contains_key(item)
    }

    /// Appends `item`, evicting the oldest entry when full.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.queue.len() >= self.capacity {
            self.pop_oldest()
        } else {
            None
        };
        *self.counts.entry(item.clone()).or_insert(0) += 1;
        self.queue.push_back(item);
        evicted
    }

    fn pop_oldest(&mut self) -> Option<T> {
        let old = self.queue.pop_front()?;
        if let Some(n) = self.counts.get_mut(&old) {
            *n -= 1;
            if *n == 0 {
                self.counts.remove(&old);
            }
        }
        Some(old)
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fifo_eviction() {
        let mut tabu = TabuList::new(3);
        assert_eq!(tabu.push('a'), None);
        assert_eq!(tabu.push('b'), None);
        assert_eq!(tabu.push('c'), None);
        assert_eq!(tabu.push('d'), Some('a'));
        assert_eq!(tabu.iter().copied().collect::<String>(), "bcd");
        assert!(!tabu.contains(&'a'));
    }

    #[test]
    fn test_duplicates_stay_tabu_until_last_copy_leaves() {
        let mut tabu = TabuList::new(2);
        tabu.push(7);
        tabu.push(7);
        tabu.push(8);
        assert!(tabu.contains(&7));
        tabu.push(9);
        assert!(!tabu.contains(&7));
    }

    #[test]
    fn test_zero_capacity_forbids_nothing() {
        let mut tabu = TabuList::new(0);
        assert_eq!(tabu.push(1), Some(1));
        assert!(tabu.is_empty());
        assert!(!tabu.contains(&1));
    }

    #[test]
    fn test_clear() {
        let mut tabu = TabuList::new(4);
        tabu.push("x");
        tabu.clear();
        assert!(tabu.is_empty());
        assert!(!tabu.contains(&"x"));
    }

    proptest! {
        #[test]
        fn prop_bounded_and_keeps_newest(cap in 1usize..8, items in prop::collection::vec(0u8..16, 0..64)) {
            let mut tabu = TabuList::new(cap);
            for &x in &items {
                tabu.push(x);
            }
            prop_assert!(tabu.len() <= cap);
            let tail = &items[items.len().saturating_sub(cap)..];
            prop_assert_eq!(tabu.iter().copied().collect::<Vec<_>>(), tail.to_vec());
            for x in 0u8..16 {
                prop_assert_eq!(tabu.contains(&x), tail.contains(&x));
            }
        }
    }
}
