//! Robots.txt handling module
//!
//! This module provides the robots policy gate: it fetches a host's
//! robots.txt on first use, caches the parsed policy for the rest of the
//! crawl, and answers permit/deny for URLs. Anything that prevents reading
//! the policy denies the whole host.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::RobotsPolicy;

use crate::crawler::Transport;
use url::Url;

/// Fetches and parses robots.txt for the origin of `url`
///
/// Only a 200 response yields rules. Other statuses and transport faults
/// produce [`RobotsPolicy::deny_all`].
pub async fn fetch_robots<T>(transport: &T, url: &Url) -> RobotsPolicy
where
    T: Transport + ?Sized,
{
    let robots_url = match url.join("/robots.txt") {
        Ok(robots_url) => robots_url,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL for {}: {}", url, e);
            return RobotsPolicy::deny_all();
        }
    };

    tracing::debug!("Fetching robots.txt from {}", robots_url);

    match transport.get(robots_url.as_str()).await {
        Ok(response) if response.status == 200 => {
            let content = String::from_utf8_lossy(&response.body);
            tracing::debug!(
                "Fetched robots.txt from {} ({} bytes)",
                robots_url,
                response.body.len()
            );
            RobotsPolicy::from_content(&content)
        }
        Ok(response) => {
            tracing::warn!(
                "robots.txt at {} returned HTTP {}, denying host",
                robots_url,
                response.status
            );
            RobotsPolicy::deny_all()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch robots.txt at {}: {}, denying host", robots_url, e);
            RobotsPolicy::deny_all()
        }
    }
}

/// Per-crawl robots policy gate
///
/// Owns the robots cache. Each host's policy is fetched once through the
/// transport passed to [`RobotsGate::can_fetch`] and reused afterwards,
/// including deny-all results.
#[derive(Debug)]
pub struct RobotsGate {
    cache: RobotsCache,
    user_agent: String,
}

impl RobotsGate {
    /// Creates a gate matching rules for the given robots.txt product token
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            cache: RobotsCache::new(),
            user_agent: user_agent.into(),
        }
    }

    /// Checks whether the crawler may fetch `url`
    ///
    /// Unparseable URLs are denied without fetching anything.
    pub async fn can_fetch<T>(&mut self, transport: &T, url: &str) -> bool
    where
        T: Transport + ?Sized,
    {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Denying unparseable URL {}: {}", url, e);
                return false;
            }
        };

        let Some(key) = RobotsCache::key_for(&parsed) else {
            tracing::debug!("Denying URL without host: {}", url);
            return false;
        };

        if self.cache.get(&key).is_none() {
            let policy = fetch_robots(transport, &parsed).await;
            self.cache.insert(key.clone(), policy);
        } else {
            tracing::trace!("Using cached robots.txt for {}", key);
        }

        let allowed = self
            .cache
            .get(&key)
            .map_or(false, |policy| policy.is_allowed(url, &self.user_agent));

        if !allowed {
            tracing::debug!("robots.txt disallows {} for {}", url, self.user_agent);
        }

        allowed
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Number of hosts with a cached policy
    pub fn cached_hosts(&self) -> usize {
        self.cache.len()
    }
}
