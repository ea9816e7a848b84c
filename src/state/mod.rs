//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: The coordinator's state machine (init, header capture, loop, done)
//! - `LinkOutcome`: What happened to each link taken off the frontier

mod crawl_phase;
mod link_outcome;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use link_outcome::LinkOutcome;
