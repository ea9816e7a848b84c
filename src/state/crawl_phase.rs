//! Crawl controller phases
//!
//! The controller moves strictly forward through
//! `Init -> HeaderCapture -> Loop -> Done`.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Scope and frontier are being set up
    Init,

    /// The seed's response headers are being captured
    HeaderCapture,

    /// Links are being dequeued, fetched and persisted
    Loop,

    /// Frontier empty or budget exhausted
    Done,
}

impl CrawlPhase {
    /// Returns the phase that follows this one, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::HeaderCapture),
            Self::HeaderCapture => Some(Self::Loop),
            Self::Loop => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns true if the controller may move from `self` to `to`
    ///
    /// Only single forward steps are allowed.
    pub fn can_transition_to(&self, to: Self) -> bool {
        self.next() == Some(to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::HeaderCapture => "header_capture",
            Self::Loop => "loop",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
