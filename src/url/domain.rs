use url::Url;

/// Extracts the host from a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use text_scraper::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Reduces a host to the key used for same-site comparison
///
/// The host is lowercased and a single leading `www.` is removed, so a host
/// and its `www` variant compare equal. Only a leading label is stripped:
/// `awww.example.com` and `example.www.com` are left alone.
///
/// # Examples
///
/// ```
/// use text_scraper::url::site_key;
///
/// assert_eq!(site_key("www.Example.com"), "example.com");
/// assert_eq!(site_key("example.com"), "example.com");
/// assert_eq!(site_key("blog.example.com"), "blog.example.com");
/// ```
pub fn site_key(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}
