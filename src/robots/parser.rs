//! Robots.txt policy implementation
//!
//! This module wraps the robotstxt crate's matcher behind a small policy type
//! that also knows how to say "no" to everything.

use robotstxt::DefaultMatcher;

/// Fetch rules for one host
///
/// Either the body of the host's robots.txt, matched on demand with
/// Google's robots.txt matcher, or a deny-all policy used when the resource
/// could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsPolicy {
    /// Raw robots.txt content
    content: String,
    /// Set when the policy resource was unavailable
    deny_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    ///
    /// # Examples
    ///
    /// ```
    /// use text_scraper::robots::RobotsPolicy;
    ///
    /// let policy = RobotsPolicy::from_content("User-agent: *\nDisallow: /private");
    /// assert!(policy.is_allowed("http://example.com/public", "text-scraper"));
    /// assert!(!policy.is_allowed("http://example.com/private/x", "text-scraper"));
    /// ```
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            deny_all: false,
        }
    }

    /// Creates a policy that refuses every URL
    ///
    /// Used when robots.txt cannot be fetched: crawling never proceeds on
    /// unknown permission.
    pub fn deny_all() -> Self {
        Self {
            content: String::new(),
            deny_all: true,
        }
    }

    pub fn is_deny_all(&self) -> bool {
        self.deny_all
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL to check
    /// * `user_agent` - The robots.txt product token of the crawler
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.deny_all {
            return false;
        }

        if self.content.trim().is_empty() {
            // An empty robots.txt places no restrictions
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
