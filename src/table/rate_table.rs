//! In-memory rate table and point lookups

use super::header::HeaderIndex;
use crate::currency::CurrencyCode;
use crate::error::{FxHistoryError, Result};
use chrono::NaiveDate;
use hashbrown::HashMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Normalized rate of one currency against the quote currency for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateEntry {
    /// Price of a single unit of the currency
    pub value: Decimal,
    pub date: NaiveDate,
}

impl RateEntry {
    pub fn new(value: Decimal, date: NaiveDate) -> Self {
        Self { value, date }
    }

    /// Lossy floating-point view of the value
    pub fn as_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for RateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Rates of one content block, indexed by date then currency code
///
/// Built once by [`build_table`](super::parser::build_table) and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<NaiveDate, HashMap<CurrencyCode, RateEntry>>,
    headers: Vec<HeaderIndex>,
}

impl RateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_header(&mut self, header: HeaderIndex) {
        self.headers.push(header);
    }

    /// Mark `date` as published, even if none of its fields hold a rate
    pub(crate) fn insert_date(&mut self, date: NaiveDate) {
        self.rates.entry(date).or_insert_with(HashMap::new);
    }

    /// Store an entry; a later insert for the same date and code wins
    pub(crate) fn insert(&mut self, code: CurrencyCode, entry: RateEntry) {
        self.rates
            .entry(entry.date)
            .or_insert_with(HashMap::new)
            .insert(code, entry);
    }

    /// Look up the rate of `code` on `date`
    ///
    /// Returns [`FxHistoryError::DateNotAvailable`] when no row exists for the
    /// date and [`FxHistoryError::CurrencyNotFound`] when the row exists but
    /// the currency has no value on it.
    pub fn lookup(&self, date: NaiveDate, code: &str) -> Result<&RateEntry> {
        let row = self
            .rates
            .get(&date)
            .ok_or(FxHistoryError::DateNotAvailable { date })?;

        row.get(code).ok_or_else(|| FxHistoryError::CurrencyNotFound {
            date,
            currency: code.to_string(),
        })
    }

    /// All rates published on a date
    pub fn rates_on(&self, date: NaiveDate) -> Option<&HashMap<CurrencyCode, RateEntry>> {
        self.rates.get(&date)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.rates.contains_key(&date)
    }

    /// Dates with a row, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rates.keys().copied().collect();
        dates.sort_unstable();
        dates
    }

    /// Header blocks the table was built from, in file order
    pub fn headers(&self) -> &[HeaderIndex] {
        &self.headers
    }

    /// Number of distinct dates
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Total number of rate entries (across all dates and currencies)
    pub fn num_entries(&self) -> usize {
        self.rates.values().map(|row| row.len()).sum()
    }
}

/// Look up the rate of `code` on `date` in a built table
pub fn lookup<'a>(table: &'a RateTable, date: NaiveDate, code: &str) -> Result<&'a RateEntry> {
    table.lookup(date, code)
}
