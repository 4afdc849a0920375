//! Crawl frontier
//!
//! A min-priority queue of canonical URLs. Lower priority values are popped
//! first; equal priorities are popped in ascending URL order so runs are
//! deterministic for a given sequence of pushes.
//!
//! The frontier never rejects a push. Deduplication is the caller's job: the
//! coordinator checks the visited set right after every pop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A canonical URL queued for fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Priority value (lower is more urgent)
    pub priority: u32,

    /// Canonical URL
    pub url: String,
}

// BinaryHeap is a max-heap, so the comparison is reversed on both keys
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.url.cmp(&self.url))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of discovered-but-unprocessed URLs
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL with the given priority
    pub fn push(&mut self, priority: u32, url: impl Into<String>) {
        self.heap.push(FrontierEntry {
            priority,
            url: url.into(),
        });
    }

    /// Removes and returns the most urgent entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Returns the most urgent entry without removing it
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek()
    }

    /// Returns the number of queued entries (duplicates included)
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns all entries in the order they would be popped
    pub fn snapshot(&self) -> Vec<FrontierEntry> {
        let mut entries = self.heap.clone().into_sorted_vec();
        // into_sorted_vec is ascending by Ord, i.e. least urgent first
        entries.reverse();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frontier() {
        let frontier = Frontier::new();
        assert_eq!(frontier.len(), 0);
        assert!(frontier.is_empty());
        assert!(frontier.peek().is_none());
    }

    #[test]
    fn test_lower_priority_popped_first() {
        let mut frontier = Frontier::new();
        frontier.push(50, "https://late.test/");
        frontier.push(3, "https://early.test/");
        frontier.push(10, "https://middle.test/");

        assert_eq!(frontier.pop().unwrap().url, "https://early.test/");
        assert_eq!(frontier.pop().unwrap().url, "https://middle.test/");
        assert_eq!(frontier.pop().unwrap().url, "https://late.test/");
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_ties_broken_by_url() {
        let mut frontier = Frontier::new();
        frontier.push(5, "https://c.test/");
        frontier.push(5, "https://a.test/");
        frontier.push(5, "https://b.test/");

        let order: Vec<String> = std::iter::from_fn(|| frontier.pop().map(|e| e.url)).collect();
        assert_eq!(
            order,
            vec!["https://a.test/", "https://b.test/", "https://c.test/"]
        );
    }

    #[test]
    fn test_duplicates_accepted() {
        let mut frontier = Frontier::new();
        frontier.push(0, "https://a.test/");
        frontier.push(0, "https://a.test/");
        frontier.push(7, "https://a.test/");

        assert_eq!(frontier.len(), 3);
    }

    #[test]
    fn test_snapshot_in_pop_order() {
        let mut frontier = Frontier::new();
        frontier.push(9, "https://z.test/");
        frontier.push(1, "https://y.test/");
        frontier.push(9, "https://a.test/");

        let snapshot = frontier.snapshot();
        assert_eq!(frontier.len(), 3);
        assert_eq!(
            snapshot,
            vec![
                FrontierEntry { priority: 1, url: "https://y.test/".to_string() },
                FrontierEntry { priority: 9, url: "https://a.test/".to_string() },
                FrontierEntry { priority: 9, url: "https://z.test/".to_string() },
            ]
        );
    }
}
