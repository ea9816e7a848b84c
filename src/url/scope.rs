use crate::url::domain::site_key;
use crate::{UrlError, UrlResult};
use url::Url;

/// The immutable boundaries of one crawl
///
/// Holds the seed URL, the origin derived from it (scheme, host and port)
/// and the page budget. Built once at crawl start and only ever borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    seed: Url,
    origin: Url,
    max_pages: usize,
}

impl CrawlScope {
    /// Creates a scope from a seed URL and a page budget
    ///
    /// # Errors
    ///
    /// Fails when the seed does not parse, is not http(s), or has no host.
    ///
    /// # Examples
    ///
    /// ```
    /// use text_scraper::url::CrawlScope;
    ///
    /// let scope = CrawlScope::new("http://www.example.com/start", 10).unwrap();
    /// assert_eq!(scope.origin().as_str(), "http://www.example.com/");
    /// assert_eq!(scope.store_name(), "www.example.com.txt");
    /// ```
    pub fn new(seed: &str, max_pages: usize) -> UrlResult<Self> {
        let seed = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(seed.scheme().to_string()));
        }

        if seed.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost);
        }

        let origin = Url::parse(&seed.origin().ascii_serialization())
            .map_err(|e| UrlError::Parse(e.to_string()))?;

        Ok(Self {
            seed,
            origin,
            max_pages,
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The origin as a URL with an empty path (`scheme://host[:port]/`)
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Lowercased host of the seed
    pub fn host(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }

    /// Explicit, non-default port of the seed
    pub fn port(&self) -> Option<u16> {
        self.origin.port()
    }

    /// True when `url` is on the crawl's site
    ///
    /// Hosts match after [`site_key`], so a host and its `www.` variant are
    /// the same site. Ports must match too, with default ports already
    /// dropped by the parser (`http://example.com:80/` has no port).
    pub fn contains(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => site_key(host) == site_key(self.host()) && url.port() == self.port(),
            None => false,
        }
    }

    /// Name of the text store the crawl appends to: `<host>[_<port>].txt`
    pub fn store_name(&self) -> String {
        match self.port() {
            Some(port) => format!("{}_{}.txt", self.host(), port),
            None => format!("{}.txt", self.host()),
        }
    }
}
