//! Output sink traits and types
//!
//! This module defines the trait interface for page sinks and the record
//! type they persist.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write to {store}: {source}")]
    Write {
        store: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Label used for the record holding the seed's response headers
pub const HEADERS_LABEL: &str = "Site Headers";

/// One block of extracted text, ready to be appended to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Identifies the block: the page path, or [`HEADERS_LABEL`]
    pub label: String,

    /// Heading text, possibly empty
    pub heading: String,

    /// Flattened body text
    pub body: String,
}

impl PageRecord {
    pub fn new(
        label: impl Into<String>,
        heading: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// Renders the record as the delimited, human-readable block stored on disk
    ///
    /// # Example
    ///
    /// ```
    /// use text_scraper::output::PageRecord;
    ///
    /// let block = PageRecord::new("/about", "About us", "We make things.").to_block();
    /// assert_eq!(
    ///     block,
    ///     "\n\n================= /about =================\n\n\nAbout us\nWe make things.\n"
    /// );
    /// ```
    pub fn to_block(&self) -> String {
        format!(
            "\n\n================= {} =================\n\n\n{}\n{}\n",
            self.label, self.heading, self.body
        )
    }
}

/// Append-only destination for page records
///
/// `store` names the target inside the sink (for the file sink, the file
/// name). Implementations must never truncate a store mid-crawl. Any error
/// is fatal to the crawl.
pub trait PageSink {
    fn append(&mut self, store: &str, record: &PageRecord) -> OutputResult<()>;
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn append(&mut self, store: &str, record: &PageRecord) -> OutputResult<()> {
        (**self).append(store, record)
    }
}
