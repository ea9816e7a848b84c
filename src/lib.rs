//! text-scraper: a polite single-site text crawler
//!
//! This crate crawls one origin from a seed URL, follows same-origin links in
//! discovery order, respects robots.txt and a page budget, and appends the
//! flattened text of every page to a per-host text file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for text-scraper operations
///
/// Only the variants in here abort a crawl. Per-link failures are reported
/// through [`FetchError`] and skipped by the coordinator.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    Phase {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Faults raised below HTTP: the request never produced a usable response
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Malformed URL {url}: {message}")]
    MalformedUrl { url: String, message: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// A response arrived but crawling rules forbid using it
#[derive(Debug, Clone, Error)]
pub enum PolicyError {
    #[error("Content type rejected for {url}: {content_type:?}")]
    ContentTypeRejected { url: String, content_type: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },
}

/// Per-link fetch failure; the coordinator skips the link and moves on
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlOptions, CrawlScope};
pub use output::{CrawlReport, PageRecord, PageSink, TextFileSink};
pub use state::{CrawlPhase, LinkOutcome};
pub use url::{classify, is_internal, resolve, LinkClassification};
