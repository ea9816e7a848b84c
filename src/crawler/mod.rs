//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The transport seam and its reqwest implementation
//! - Page fetching with content-type and status gating
//! - Text, heading and link extraction
//! - The FIFO frontier and link discovery
//! - Overall crawl coordination

mod coordinator;
mod discover;
mod fetcher;
mod frontier;
mod parser;
mod transport;

pub use coordinator::{run_crawl, Coordinator, CrawlOptions};
pub use discover::discover_links;
pub use fetcher::{fetch_page, is_html_content_type, FetchOutcome, Page};
pub use frontier::{DiscoveredLink, Frontier};
pub use parser::{extract_links, parse_page, transform, ParsedPage, NON_CONTENT_TAGS};
pub use transport::{build_http_client, user_agent_string, HttpTransport, RawResponse, Transport};

pub use crate::url::CrawlScope;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Derive the crawl scope from the seed URL and page budget
/// 2. Build the HTTP transport and open the output directory
/// 3. Capture the seed's response headers
/// 4. Fetch, transform and persist pages until the frontier empties or the
///    budget runs out
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(CrawlError)` - Crawl failed
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    run_crawl(config).await
}
