//! Bounded FIFO of forbidden swaps.

use std::collections::{HashMap, VecDeque};

use super::types::TabuEntry;

/// Short-term memory of recently accepted swaps, most recent first.
///
/// Holding at most `capacity` entries; pushing onto a full list evicts the
/// oldest entry.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::{TabuEntry, TabuList};
///
/// let mut list = TabuList::new(2);
/// list.push(TabuEntry::new(0, 1));
/// list.push(TabuEntry::new(2, 3));
/// list.push(TabuEntry::new(4, 5));
/// assert_eq!(list.len(), 2);
/// assert!(!list.is_tabu(1, 0));
/// assert!(list.is_tabu(5, 4));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList {
    entries: VecDeque<TabuEntry>,
    // Occurrences of each entry in `entries`
    counts: HashMap<TabuEntry, usize>,
    capacity: usize,
}

impl TabuList {
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            counts: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns `true` if the unordered pair `{a, b}` is forbidden.
    pub fn is_tabu(&self, a: usize, b: usize) -> bool {
        self.counts.contains_key(&TabuEntry::new(a, b))
    }

    /// Records an accepted swap at the front, evicting the oldest entries
    /// beyond capacity.
    pub fn push(&mut self, entry: TabuEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        *self.counts.entry(entry).or_insert(0) += 1;
        while self.entries.len() > self.capacity {
            self.pop_oldest();
        }
    }

    /// Removes and returns the least recently added entry.
    pub fn pop_oldest(&mut self) -> Option<TabuEntry> {
        let entry = self.entries.pop_back()?;
        if let Some(count) = self.counts.get_mut(&entry) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&entry);
            }
        }
        Some(entry)
    }

    /// Entries from most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &TabuEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no swap is forbidden.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_order() {
        let mut list = TabuList::new(3);
        list.push(TabuEntry::new(0, 1));
        list.push(TabuEntry::new(1, 2));
        let entries: Vec<_> = list.iter().map(|e| e.pair()).collect();
        assert_eq!(entries, vec![(1, 2), (0, 1)]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut list = TabuList::new(20);
        for k in 0..25 {
            list.push(TabuEntry::new(k, k + 1));
            assert!(list.len() <= 20);
        }
        assert_eq!(list.len(), 20);
        // The 20 most recent: pairs (5,6) ..= (24,25)
        for k in 0..5 {
            assert!(!list.is_tabu(k, k + 1));
        }
        for k in 5..25 {
            assert!(list.is_tabu(k + 1, k));
        }
        assert_eq!(list.iter().next().map(|e| e.pair()), Some((24, 25)));
    }

    #[test]
    fn test_pop_oldest() {
        let mut list = TabuList::new(5);
        list.push(TabuEntry::new(0, 1));
        list.push(TabuEntry::new(2, 3));
        assert_eq!(list.pop_oldest(), Some(TabuEntry::new(0, 1)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_oldest(), Some(TabuEntry::new(2, 3)));
        assert!(list.is_empty());
        assert_eq!(list.pop_oldest(), None);
    }

    #[test]
    fn test_zero_capacity() {
        let mut list = TabuList::new(0);
        list.push(TabuEntry::new(0, 1));
        assert!(list.is_empty());
        assert!(!list.is_tabu(0, 1));
    }

    #[test]
    fn test_repeated_entry_stays_tabu_until_last_copy_leaves() {
        let mut list = TabuList::new(3);
        list.push(TabuEntry::new(0, 1));
        list.push(TabuEntry::new(1, 0));
        list.push(TabuEntry::new(2, 3));
        assert_eq!(list.pop_oldest(), Some(TabuEntry::new(0, 1)));
        assert!(list.is_tabu(0, 1));

        list.push(TabuEntry::new(4, 5));
        list.push(TabuEntry::new(6, 7));
        assert!(!list.is_tabu(0, 1));
        assert!(list.is_tabu(2, 3));
        assert_eq!(list.len(), 3);
    }
}
