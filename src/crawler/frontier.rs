//! Crawl frontier
//!
//! A FIFO queue of discovered links plus the bookkeeping that guarantees
//! every URL is queued at most once per crawl:
//! - `queued` holds URLs waiting in the queue
//! - `processed` holds URLs already dequeued
//!
//! A URL moves from `queued` to `processed` when it is dequeued and is never
//! in both sets at once.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A link that passed validation and is waiting to be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// The `href` exactly as it appeared on the page
    pub raw: String,

    /// The absolute URL the link resolved to
    pub url: Url,
}

impl DiscoveredLink {
    pub fn new(raw: impl Into<String>, url: Url) -> Self {
        Self {
            raw: raw.into(),
            url,
        }
    }

    /// The key used for deduplication
    pub fn key(&self) -> &str {
        self.url.as_str()
    }
}

/// FIFO frontier with first-discovery-wins deduplication
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<DiscoveredLink>,
    queued: HashSet<String>,
    processed: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link to the back of the queue
    ///
    /// Returns false, leaving the frontier untouched, if the URL is already
    /// queued or was processed earlier in the crawl.
    pub fn enqueue(&mut self, link: DiscoveredLink) -> bool {
        if self.contains(link.key()) {
            return false;
        }

        self.queued.insert(link.key().to_string());
        self.queue.push_back(link);
        true
    }

    /// Removes the oldest link and marks it processed
    pub fn dequeue(&mut self) -> Option<DiscoveredLink> {
        let link = self.queue.pop_front()?;
        self.queued.remove(link.key());
        self.processed.insert(link.key().to_string());
        Some(link)
    }

    /// True if the URL is queued or already processed
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url) || self.processed.contains(url)
    }

    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn is_processed(&self, url: &str) -> bool {
        self.processed.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of links waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Iterates over queued links in the order they will be dequeued
    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredLink> {
        self.queue.iter()
    }
}
