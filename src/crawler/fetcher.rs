//! Page fetcher
//!
//! One GET per call, no retries. The fetcher decides whether a response is a
//! usable HTML page:
//! - transport faults become [`FetchError::Transport`]
//! - a missing or non-HTML Content-Type becomes [`PolicyError::ContentTypeRejected`]
//! - any status other than 200 is [`FetchOutcome::NotLoaded`], not an error

use crate::crawler::transport::Transport;
use crate::{FetchError, PolicyError};

/// A fetched HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code (always 200 for a loaded page)
    pub status: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Page body, decoded as UTF-8 with invalid sequences replaced
    pub body: String,
}

/// Result of a fetch that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Status 200 with an HTML body
    Loaded(Page),
    /// Any other status; there is nothing to process
    NotLoaded { status: u16 },
}

/// Returns true if a Content-Type value declares HTML
///
/// # Examples
///
/// ```
/// use text_scraper::crawler::is_html_content_type;
///
/// assert!(is_html_content_type("text/html; charset=utf-8"));
/// assert!(is_html_content_type("TEXT/HTML"));
/// assert!(!is_html_content_type("application/pdf"));
/// ```
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Fetches a URL and gates it on content type and status
///
/// The content type is checked first, on every response, so a non-HTML
/// error page is reported as a policy rejection rather than "not loaded".
///
/// # Arguments
///
/// * `transport` - The transport to issue the GET with
/// * `url` - The absolute URL to fetch
pub async fn fetch_page<T>(transport: &T, url: &str) -> Result<FetchOutcome, FetchError>
where
    T: Transport + ?Sized,
{
    let response = transport.get(url).await?;

    let content_type = response.content_type().unwrap_or_default().to_string();
    if !is_html_content_type(&content_type) {
        return Err(PolicyError::ContentTypeRejected {
            url: url.to_string(),
            content_type,
        }
        .into());
    }

    if response.status != 200 {
        tracing::debug!("Page not loaded: {} returned HTTP {}", url, response.status);
        return Ok(FetchOutcome::NotLoaded {
            status: response.status,
        });
    }

    Ok(FetchOutcome::Loaded(Page {
        url: response.url,
        status: response.status,
        content_type,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    }))
}
