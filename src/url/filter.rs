use url::Url;

/// File extensions that are never worth fetching for text
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".txt", ".jpg", ".png", ".doc", ".docx", ".pdf", ".ppt", ".pptx", ".py", ".exe", ".dmg",
];

/// Drops links whose path ends in an excluded file extension
///
/// The extension is taken from the last path segment, dot included, and
/// compared case-insensitively. A leading dot alone (`/.htaccess`) is not an
/// extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns true when the URL must not reach the frontier
    ///
    /// # Examples
    ///
    /// ```
    /// use text_scraper::url::ExtensionFilter;
    /// use url::Url;
    ///
    /// let filter = ExtensionFilter::default();
    /// assert!(filter.is_excluded(&Url::parse("http://example.com/report.PDF").unwrap()));
    /// assert!(!filter.is_excluded(&Url::parse("http://example.com/report.html").unwrap()));
    /// ```
    pub fn is_excluded(&self, url: &Url) -> bool {
        match extension_of(url.path()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|excluded| *excluded == ext)
            }
            None => false,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_EXTENSIONS)
    }
}

/// Extension of the last path segment, including the dot
fn extension_of(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let stem_len = segment.trim_start_matches('.').len();
    let leading_dots = segment.len() - stem_len;

    segment[leading_dots..]
        .rfind('.')
        .map(|idx| &segment[leading_dots + idx..])
}
