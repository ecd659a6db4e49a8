//! The crawl frontier: a breadth-first queue with O(1) dedup
//!
//! Shallow pages are processed before deep ones, which matters under a page
//! budget: the likely-relevant monthly chart pages sit close to the seeds.

use std::collections::{HashMap, VecDeque};
use url::Url;

/// A URL awaiting crawl, with the depth it was discovered at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// Per-URL lifecycle state in the frontier arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlState {
    /// Enqueued, waiting to be consumed
    Queued,
    /// Consumed; membership is permanent for the run
    Done,
}

/// Breadth-first frontier owned by one crawl run
///
/// Every URL passes through the frontier exactly once: `enqueue` refuses
/// anything already known, and `next` marks the entry consumed for good.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    states: HashMap<String, UrlState>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL at the given depth
    ///
    /// Returns false when the URL was already known (queued or done).
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        let key = url.as_str().to_string();
        if self.states.contains_key(&key) {
            return false;
        }

        self.states.insert(key, UrlState::Queued);
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Takes the next entry in breadth-first order, marking it consumed
    pub fn next(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.states
            .insert(entry.url.as_str().to_string(), UrlState::Done);
        Some(entry)
    }

    /// Returns true when the URL has ever been enqueued
    pub fn is_known(&self, url: &Url) -> bool {
        self.states.contains_key(url.as_str())
    }

    /// Number of entries still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_enqueue_and_next_fifo_order() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(url("/a"), 0));
        assert!(frontier.enqueue(url("/b"), 1));

        assert_eq!(frontier.next().unwrap().url, url("/a"));
        assert_eq!(frontier.next().unwrap().url, url("/b"));
        assert!(frontier.next().is_none());
    }

    #[test]
    fn test_duplicate_enqueue_refused() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(url("/a"), 0));
        assert!(!frontier.enqueue(url("/a"), 1));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_consumed_urls_stay_known() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("/a"), 0);
        let entry = frontier.next().unwrap();

        // Re-discovering a finished page must not re-enqueue it
        assert!(frontier.is_known(&entry.url));
        assert!(!frontier.enqueue(entry.url, 2));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_depth_is_preserved() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("/deep"), 3);
        assert_eq!(frontier.next().unwrap().depth, 3);
    }

    #[test]
    fn test_breadth_first_over_mixed_depths() {
        let mut frontier = Frontier::new();
        frontier.enqueue(url("/seed"), 0);
        frontier.enqueue(url("/child"), 1);
        frontier.enqueue(url("/sibling"), 0);

        // Strict insertion order, a queue not a stack
        let order: Vec<u32> = std::iter::from_fn(|| frontier.next())
            .map(|e| e.depth)
            .collect();
        assert_eq!(order, vec![0, 1, 0]);
    }
}
