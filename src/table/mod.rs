//! Rate table engine
//!
//! Turns the raw text of one yearly table into an in-memory, date- and
//! currency-indexed structure and serves point lookups against it.
//!
//! # Components
//!
//! - **format**: source file dialect (delimiter, date format, decimal comma)
//! - **header**: header row -> currency columns with unit bases
//! - **parser**: data rows -> normalized [`RateTable`]
//! - **rate_table**: the table itself and lookups
//! - **builder**: lazy, build-once cache around one content block
//!
//! # Example
//!
//! ```rust
//! use rusty_fxhistory::table::{build, lookup};
//! use chrono::NaiveDate;
//!
//! let content = "Datum|1 EUR|100 JPY\n30.01.2015|27,795|2768,00\n";
//! let table = build(content).unwrap();
//! let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
//!
//! assert_eq!(lookup(&table, date, "EUR").unwrap().to_string(), "27.795");
//! assert_eq!(lookup(&table, date, "JPY").unwrap().to_string(), "27.68");
//! ```

pub mod builder;
pub mod format;
pub mod header;
pub mod parser;
pub mod rate_table;

pub use builder::RateTableBuilder;
pub use format::TableFormat;
pub use header::{parse_header, parse_header_with, CurrencyColumn, HeaderIndex};
pub use parser::{build, build_table};
pub use rate_table::{lookup, RateEntry, RateTable};
