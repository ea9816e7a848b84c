//! URL handling module for text-scraper
//!
//! This module provides the crawl scope, resolution against the crawl
//! origin, same-site checks, link classification and the file-extension
//! filter.

mod domain;
mod filter;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{extract_host, site_key};
pub use filter::{ExtensionFilter, DEFAULT_EXCLUDED_EXTENSIONS};
pub use normalize::{
    classify, is_internal, resolve, resolve_link, InvalidReason, LinkClassification,
};
pub use scope::CrawlScope;
