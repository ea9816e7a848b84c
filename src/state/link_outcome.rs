//! Outcome definitions for dequeued links
//!
//! Every link taken off the frontier ends in exactly one of these outcomes.
use std::fmt;

/// What happened to a link the coordinator processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkOutcome {
    // ===== Success =====
    /// Page was fetched, transformed and appended to the output store
    Persisted,

    // ===== Skips =====
    /// robots.txt (or an unavailable robots.txt) forbids the URL
    RobotsDenied,

    /// The response was not declared as HTML
    ContentRejected,

    /// The response status was not 200
    NotLoaded,

    // ===== Failures =====
    /// Malformed URL, refused connection, timeout or unreadable body
    TransportFailed,
}

impl LinkOutcome {
    /// Returns true if the page made it to the output store
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    /// Returns true if crawling rules or the server's answer skipped the page
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::RobotsDenied | Self::ContentRejected | Self::NotLoaded
        )
    }

    /// Returns true if the request itself failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::TransportFailed)
    }

    /// Short machine-friendly name, used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::RobotsDenied => "robots_denied",
            Self::ContentRejected => "content_rejected",
            Self::NotLoaded => "not_loaded",
            Self::TransportFailed => "transport_failed",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 5] {
        [
            Self::Persisted,
            Self::RobotsDenied,
            Self::ContentRejected,
            Self::NotLoaded,
            Self::TransportFailed,
        ]
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
