//! # rusty_fxhistory
//!
//! Historical exchange rates from yearly central-bank rate tables.
//!
//! A yearly table is a flat `|`-delimited text file, as published by the
//! Czech National Bank: a header row naming one column per currency with its
//! quotation unit, followed by one row per publication date. This crate
//! parses such tables into a date- and currency-indexed structure, normalizes
//! every rate to a single unit, and serves cached point lookups.
//!
//! ## Example
//!
//! ```rust
//! use rusty_fxhistory::prelude::*;
//! use chrono::NaiveDate;
//!
//! let source = StaticSource::new().with_year(
//!     2015,
//!     "Datum|1 EUR|100 JPY\n30.01.2015|27,795|2768,00\n",
//! );
//! let provider = HistoryProvider::new(source);
//! let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
//!
//! let eur = provider.fetch_rate(&CurrencyPair::from_string("EUR/CZK").unwrap(), date).unwrap();
//! assert_eq!(eur.to_string(), "27.795");
//!
//! let jpy = provider.fetch_rate(&CurrencyPair::from_string("JPY/CZK").unwrap(), date).unwrap();
//! assert_eq!(jpy.to_string(), "27.68");
//! ```

pub mod currency;
pub mod error;
pub mod provider;
pub mod source;
pub mod table;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::currency::{CurrencyCode, CurrencyPair};
    pub use crate::error::{FxHistoryError, Result};
    pub use crate::provider::{HistoryProvider, QuoteCurrencyGuard, RateHistory};
    pub use crate::source::{ContentSource, DirectorySource, StaticSource};
    pub use crate::table::{RateEntry, RateTable, RateTableBuilder, TableFormat};
}
