use crate::url::CrawlScope;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Why a candidate link was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// Scheme present and not http/https (`mailto:`, `javascript:`, `ftp:` ...)
    UnsupportedScheme,
    /// Host differs from the crawl origin
    External,
    /// No host, no path and no fragment (`""`, `"#"`, `"?q=1"`)
    EmptyReference,
    /// Cannot be turned into a URL
    Malformed,
}

/// Outcome of [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClassification {
    Valid,
    Invalid(InvalidReason),
}

impl LinkClassification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Parses an absolute reference, or joins a relative one against the origin
fn join_reference(url: &str, scope: &CrawlScope) -> Result<Url, ParseError> {
    match Url::parse(url) {
        Err(ParseError::RelativeUrlWithoutBase) => scope.origin().join(url),
        parsed => parsed,
    }
}

/// Resolves a link against the crawl origin
///
/// References without a scheme are joined against the scope's origin (not
/// against the page they were found on). Absolute references are parsed as
/// they are. Fragments are kept, so `/about#team` and `/about` stay distinct.
///
/// Resolution is idempotent: feeding the result back in yields the same URL.
///
/// # Examples
///
/// ```
/// use text_scraper::url::{resolve, CrawlScope};
///
/// let scope = CrawlScope::new("http://example.com/blog/", 10).unwrap();
/// let url = resolve("about", &scope).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/about");
///
/// let again = resolve(url.as_str(), &scope).unwrap();
/// assert_eq!(again, url);
/// ```
pub fn resolve(url: &str, scope: &CrawlScope) -> UrlResult<Url> {
    let url = url.trim();
    join_reference(url, scope).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))
}

/// Checks whether a link stays on the crawl's site
///
/// The link is resolved first and the decision is made on the resolved
/// host and port (see [`CrawlScope::contains`]), so relative links are
/// internal and links that only look relative are not. Unresolvable links
/// are never internal.
///
/// # Examples
///
/// ```
/// use text_scraper::url::{is_internal, CrawlScope};
///
/// let scope = CrawlScope::new("http://example.com/", 10).unwrap();
/// assert!(is_internal("http://www.example.com/x", &scope));
/// assert!(is_internal("/relative", &scope));
/// assert!(!is_internal("http://other.com/x", &scope));
/// assert!(!is_internal("//other.com/x", &scope));
/// ```
pub fn is_internal(url: &str, scope: &CrawlScope) -> bool {
    resolve(url, scope).map_or(false, |url| scope.contains(&url))
}

/// True for references that point nowhere: no host, no path, no fragment
///
/// Covers `""`, `"#"` and query-only references such as `"?page=2"`.
fn is_empty_reference(url: &str) -> bool {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, fragment),
        None => (url, ""),
    };
    let target = rest.split_once('?').map_or(rest, |(target, _)| target);

    target.is_empty() && fragment.is_empty()
}

/// Resolves a raw link found on a page, or says why it cannot be followed
///
/// Scope is decided on the resolved URL, never on the raw text: the `url`
/// crate reads `\\other.com/x` or `http:/other.com/x` as links to
/// `other.com`, and so does this check.
pub fn resolve_link(url: &str, scope: &CrawlScope) -> Result<Url, InvalidReason> {
    let raw = url.trim();
    let url = join_reference(raw, scope).map_err(|_| InvalidReason::Malformed)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(InvalidReason::UnsupportedScheme);
    }

    if !scope.contains(&url) {
        return Err(InvalidReason::External);
    }

    if is_empty_reference(raw) {
        return Err(InvalidReason::EmptyReference);
    }

    Ok(url)
}

/// Classifies a raw link found on a page
///
/// Checks run in a fixed order: resolution, scheme, origin and empty
/// reference. The first failing check decides the reason.
///
/// # Examples
///
/// ```
/// use text_scraper::url::{classify, CrawlScope, InvalidReason, LinkClassification};
///
/// let scope = CrawlScope::new("http://example.com/", 10).unwrap();
/// assert_eq!(classify("/about#team", &scope), LinkClassification::Valid);
/// assert_eq!(
///     classify("#", &scope),
///     LinkClassification::Invalid(InvalidReason::EmptyReference)
/// );
/// assert_eq!(
///     classify("mailto:me@example.com", &scope),
///     LinkClassification::Invalid(InvalidReason::UnsupportedScheme)
/// );
/// ```
pub fn classify(url: &str, scope: &CrawlScope) -> LinkClassification {
    match resolve_link(url, scope) {
        Ok(_) => LinkClassification::Valid,
        Err(reason) => LinkClassification::Invalid(reason),
    }
}
