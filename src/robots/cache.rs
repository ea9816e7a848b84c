//! Per-host robots.txt cache
//!
//! Policies are fetched once per host and kept for the rest of the crawl.
//! There is no expiry: a crawl is short-lived and never resumed.

use crate::robots::RobotsPolicy;
use crate::url::extract_host;
use std::collections::HashMap;
use url::Url;

/// Cache of robots policies keyed by `host[:port]`
#[derive(Debug, Default)]
pub struct RobotsCache {
    policies: HashMap<String, RobotsPolicy>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache key for a URL, or `None` if it has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use text_scraper::robots::RobotsCache;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://Example.com:8080/page").unwrap();
    /// assert_eq!(RobotsCache::key_for(&url), Some("example.com:8080".to_string()));
    /// ```
    pub fn key_for(url: &Url) -> Option<String> {
        let host = extract_host(url)?;
        Some(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        })
    }

    pub fn get(&self, key: &str) -> Option<&RobotsPolicy> {
        self.policies.get(key)
    }

    /// Stores a policy and returns a reference to it
    ///
    /// The first policy stored for a host wins; later inserts are ignored.
    pub fn insert(&mut self, key: String, policy: RobotsPolicy) -> &RobotsPolicy {
        self.policies.entry(key).or_insert(policy)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
