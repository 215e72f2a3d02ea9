//! Lazily built, cached table for one content block

use super::format::TableFormat;
use super::parser::build_table;
use super::rate_table::{RateEntry, RateTable};
use crate::error::Result;
use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Owns the raw content of one year and builds its [`RateTable`] on first use
///
/// The unbuilt -> built transition happens at most once between resets, even
/// under concurrent first lookups. A failed build exposes nothing and is
/// retried by the next call.
///
/// # Example
/// ```
/// use rusty_fxhistory::table::RateTableBuilder;
/// use chrono::NaiveDate;
///
/// let builder = RateTableBuilder::new("Datum|1 EUR\n30.01.2015|27,795\n");
/// let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
///
/// let rate = builder.lookup(date, "EUR").unwrap();
/// assert_eq!(rate.to_string(), "27.795");
/// assert_eq!(builder.build_count(), 1);
/// ```
#[derive(Debug)]
pub struct RateTableBuilder {
    content: String,
    format: TableFormat,
    table: OnceCell<Arc<RateTable>>,
    builds: AtomicUsize,
}

impl RateTableBuilder {
    /// Create a builder for CNB-formatted content
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_format(content, TableFormat::default())
    }

    pub fn with_format(content: impl Into<String>, format: TableFormat) -> Self {
        Self {
            content: content.into(),
            format,
            table: OnceCell::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Get the table, building it on first access
    pub fn table(&self) -> Result<Arc<RateTable>> {
        self.table
            .get_or_try_init(|| {
                self.builds.fetch_add(1, Ordering::SeqCst);
                build_table(&self.content, &self.format).map(Arc::new)
            })
            .map(Arc::clone)
    }

    /// Look up the rate of `code` on `date`
    pub fn lookup(&self, date: NaiveDate, code: &str) -> Result<RateEntry> {
        let table = self.table()?;
        table.lookup(date, code).cloned()
    }

    /// Whether the table has been built
    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    /// Number of build attempts so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> &TableFormat {
        &self.format
    }

    /// Drop the cached table, the next lookup rebuilds it
    pub fn reset(&mut self) {
        self.table.take();
    }

    /// Swap in new content and drop the cached table
    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.reset();
    }
}
