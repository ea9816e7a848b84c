//! Output module for persisting extracted text and reporting on a crawl
//!
//! This module handles:
//! - Appending page records to per-site text stores
//! - Accumulating and printing crawl reports

pub mod stats;
mod text_file;
mod traits;

pub use stats::{print_report, CrawlReport};
pub use text_file::TextFileSink;
pub use traits::{OutputError, OutputResult, PageRecord, PageSink, HEADERS_LABEL};
