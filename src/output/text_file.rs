//! Append-only text file sink
//!
//! Each store is a plain text file inside the output directory. Records are
//! appended as delimited blocks; files are opened in append mode for every
//! record, so nothing already written is ever truncated.

use crate::output::traits::{OutputError, OutputResult, PageRecord, PageSink};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// [`PageSink`] writing to `<directory>/<store>`
#[derive(Debug, Clone)]
pub struct TextFileSink {
    directory: PathBuf,
}

impl TextFileSink {
    /// Creates a sink rooted at `directory`, creating the directory if needed
    ///
    /// # Returns
    ///
    /// * `Ok(TextFileSink)` - The directory exists and the sink is ready
    /// * `Err(OutputError)` - The directory could not be created
    pub fn create(directory: impl Into<PathBuf>) -> OutputResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of a store
    pub fn path_for(&self, store: &str) -> PathBuf {
        self.directory.join(store)
    }
}

impl PageSink for TextFileSink {
    fn append(&mut self, store: &str, record: &PageRecord) -> OutputResult<()> {
        let path = self.path_for(store);
        let write_error = |source| OutputError::Write {
            store: path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(write_error)?;

        file.write_all(record.to_block().as_bytes())
            .map_err(write_error)?;

        tracing::trace!("Appended {:?} to {}", record.label, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_file() {
        let dir = TempDir::new().unwrap();
        let mut sink = TextFileSink::create(dir.path()).unwrap();

        sink.append("example.com.txt", &PageRecord::new("/", "Home", "Welcome"))
            .unwrap();

        let content = fs::read_to_string(dir.path().join("example.com.txt")).unwrap();
        assert!(content.contains("================= / ================="));
        assert!(content.contains("\nHome\n"));
        assert!(content.contains("Welcome"));
    }

    #[test]
    fn test_append_never_truncates() {
        let dir = TempDir::new().unwrap();
        let mut sink = TextFileSink::create(dir.path()).unwrap();
        let store = "site.txt";

        fs::write(sink.path_for(store), "existing\n").unwrap();
        sink.append(store, &PageRecord::new("/a", "", "first")).unwrap();
        sink.append(store, &PageRecord::new("/b", "", "second")).unwrap();

        let content = fs::read_to_string(sink.path_for(store)).unwrap();
        assert!(content.starts_with("existing\n"));
        let first = content.find("first").unwrap();
        let second = content.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_create_makes_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("text");

        let sink = TextFileSink::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(sink.directory(), nested.as_path());
    }

    #[test]
    fn test_unwritable_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut sink = TextFileSink::create(dir.path()).unwrap();

        // A directory with the store's name cannot be opened for appending
        fs::create_dir(sink.path_for("blocked.txt")).unwrap();
        let result = sink.append("blocked.txt", &PageRecord::new("/", "", ""));

        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
