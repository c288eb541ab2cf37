//! Breadth-first crawl frontier
//!
//! The frontier owns both the FIFO queue and the visited-set for one crawl.
//! URLs are keyed by their normalized form, so callers must pass URLs that
//! went through [`crate::url::normalize_url`].

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of URLs to visit plus the set of URLs already visited
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Url>,

    /// Mirrors `queue` for O(1) membership checks
    queued: HashSet<String>,

    visited: HashSet<String>,

    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: Url, max_pages: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_pages,
        };
        frontier.enqueue(seed);
        frontier
    }

    /// Pops the oldest unvisited URL and marks it visited
    ///
    /// Returns None once the queue is exhausted or `max_pages` URLs have
    /// been handed out.
    pub fn next_url(&mut self) -> Option<Url> {
        while self.visited.len() < self.max_pages {
            let url = self.queue.pop_front()?;
            self.queued.remove(url.as_str());

            if self.visited.contains(url.as_str()) {
                continue;
            }

            self.visited.insert(url.as_str().to_string());
            return Some(url);
        }
        None
    }

    /// Adds a URL unless it was already visited or is already waiting
    ///
    /// Returns true if the URL was newly queued.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(url.as_str()) || self.queued.contains(url.as_str()) {
            return false;
        }
        self.queued.insert(url.as_str().to_string());
        self.queue.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true when no further URL will be handed out
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() || self.visited.len() >= self.max_pages
    }
}
