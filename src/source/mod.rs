//! Content sources for yearly rate tables
//!
//! The table engine only consumes text. Sources are the collaborators that
//! produce the raw content of one calendar year:
//! - [`StaticSource`]: contents held in memory
//! - [`DirectorySource`]: one file per year on disk
//! - `HttpSource`: GET per year from a URL template (feature `http`)

#[cfg(feature = "http")]
pub mod http;
pub mod url;

#[cfg(feature = "http")]
pub use http::HttpSource;
pub use url::{UrlTemplate, CNB_YEAR_URL};

use crate::error::{FxHistoryError, Result};
use hashbrown::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for producers of raw yearly table content
pub trait ContentSource: Send + Sync {
    /// Raw content of the table for `year`
    fn fetch_year(&self, year: i32) -> Result<String>;

    /// Human readable description (URL, directory, ...)
    fn describe(&self) -> String;
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn fetch_year(&self, year: i32) -> Result<String> {
        (**self).fetch_year(year)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory contents keyed by year
#[derive(Debug, Default)]
pub struct StaticSource {
    contents: HashMap<i32, String>,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_year(mut self, year: i32, content: impl Into<String>) -> Self {
        self.insert(year, content);
        self
    }

    pub fn insert(&mut self, year: i32, content: impl Into<String>) {
        self.contents.insert(year, content.into());
    }

    /// Number of `fetch_year` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for StaticSource {
    fn fetch_year(&self, year: i32) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.contents
            .get(&year)
            .cloned()
            .ok_or_else(|| FxHistoryError::Fetch(format!("No content for year {}", year)))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} years)", self.contents.len())
    }
}

/// Reads `<dir>/<prefix><year>.txt`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    prefix: String,
}

impl DirectorySource {
    /// Default file prefix, `cnb_year_2015.txt`
    pub const DEFAULT_PREFIX: &'static str = "cnb_year_";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, Self::DEFAULT_PREFIX)
    }

    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Path of the file holding `year`
    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{}{}.txt", self.prefix, year))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ContentSource for DirectorySource {
    fn fetch_year(&self, year: i32) -> Result<String> {
        let path = self.path_for(year);
        log::info!("Reading rate table for {} from {}", year, path.display());
        Ok(fs::read_to_string(path)?)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_source() {
        let source = StaticSource::new().with_year(2015, "Datum|1 EUR");

        assert_eq!(source.fetch_year(2015).unwrap(), "Datum|1 EUR");
        assert!(matches!(
            source.fetch_year(2014),
            Err(FxHistoryError::Fetch(_))
        ));
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());

        let mut file = fs::File::create(source.path_for(2015)).unwrap();
        writeln!(file, "Datum|1 EUR").unwrap();

        assert_eq!(source.fetch_year(2015).unwrap(), "Datum|1 EUR\n");
        assert!(matches!(
            source.fetch_year(2014),
            Err(FxHistoryError::IoError(_))
        ));
    }

    #[test]
    fn test_directory_source_prefix() {
        let source = DirectorySource::with_prefix("/data", "rates-");
        assert_eq!(source.path_for(2014), PathBuf::from("/data/rates-2014.txt"));
    }
}
