//! Multi-year history provider

use super::guard::QuoteCurrencyGuard;
use super::RateHistory;
use crate::currency::CurrencyPair;
use crate::error::{FxHistoryError, Result};
use crate::source::ContentSource;
use crate::table::{RateEntry, RateTable, RateTableBuilder, TableFormat};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use hashbrown::HashMap;
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

type YearSlot = Arc<OnceCell<Arc<RateTableBuilder>>>;

/// Serves historical rates, one lazily fetched and built table per year
///
/// Each year's content is fetched at most once and its table built at most
/// once, even when several threads ask for the same uncached year.
///
/// # Example
/// ```
/// use rusty_fxhistory::provider::HistoryProvider;
/// use rusty_fxhistory::source::StaticSource;
/// use rusty_fxhistory::currency::CurrencyPair;
/// use chrono::NaiveDate;
///
/// let source = StaticSource::new().with_year(2015, "Datum|1 EUR\n30.01.2015|27,795\n");
/// let provider = HistoryProvider::new(source);
///
/// let pair = CurrencyPair::from_string("EUR/CZK").unwrap();
/// let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
/// assert_eq!(provider.fetch_rate(&pair, date).unwrap().to_string(), "27.795");
/// ```
pub struct HistoryProvider<S: ContentSource> {
    source: S,
    guard: QuoteCurrencyGuard,
    format: TableFormat,
    years: RwLock<HashMap<i32, YearSlot>>,
}

impl<S: ContentSource> HistoryProvider<S> {
    /// Provider for CNB tables (quote currency CZK)
    pub fn new(source: S) -> Self {
        Self::with_settings(source, QuoteCurrencyGuard::czk(), TableFormat::cnb())
    }

    pub fn with_settings(source: S, guard: QuoteCurrencyGuard, format: TableFormat) -> Self {
        Self {
            source,
            guard,
            format,
            years: RwLock::new(HashMap::new()),
        }
    }

    /// Rate of `pair.base` in the quote currency on `date`
    ///
    /// The pair is checked before anything is fetched or parsed.
    pub fn fetch_rate(&self, pair: &CurrencyPair, date: NaiveDate) -> Result<RateEntry> {
        self.guard.check(pair)?;
        let builder = self.builder_for_year(date.year())?;
        builder.lookup(date, pair.base.as_str())
    }

    /// Same as [`fetch_rate`](Self::fetch_rate), ignoring the time of day
    pub fn fetch_rate_at(&self, pair: &CurrencyPair, dt: NaiveDateTime) -> Result<RateEntry> {
        self.fetch_rate(pair, dt.date())
    }

    /// Rate on `date`, or on the closest earlier published date
    ///
    /// Walks back one day at a time, into the previous year's table if
    /// needed, while the date has no row at all. Gives up after
    /// `max_days_back` days with [`FxHistoryError::DateNotAvailable`] for the
    /// requested date. Any other error stops the walk. The returned entry
    /// carries the date the rate was published for.
    pub fn fetch_rate_or_previous(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
        max_days_back: u32,
    ) -> Result<RateEntry> {
        self.guard.check(pair)?;

        let mut current = date;
        let mut remaining = max_days_back;
        loop {
            match self.fetch_rate(pair, current) {
                Err(FxHistoryError::DateNotAvailable { .. }) if remaining > 0 => {
                    remaining -= 1;
                    current = current
                        .pred_opt()
                        .ok_or(FxHistoryError::DateNotAvailable { date })?;
                }
                Err(FxHistoryError::DateNotAvailable { .. }) => {
                    log::warn!(
                        "No {} rate within {} days before {}",
                        pair,
                        max_days_back,
                        date
                    );
                    return Err(FxHistoryError::DateNotAvailable { date });
                }
                result => {
                    if current != date && result.is_ok() {
                        log::debug!("Using {} rate of {} for {}", pair, current, date);
                    }
                    return result;
                }
            }
        }
    }

    /// Built table for `year`
    pub fn table_for_year(&self, year: i32) -> Result<Arc<RateTable>> {
        self.builder_for_year(year)?.table()
    }

    /// Fetch and build several years in parallel
    pub fn preload(&self, years: &[i32]) -> Result<()> {
        years
            .par_iter()
            .try_for_each(|&year| self.table_for_year(year).map(|_| ()))
    }

    /// Years whose content has been fetched, ascending
    pub fn cached_years(&self) -> Vec<i32> {
        let years = self.years.read().unwrap_or_else(PoisonError::into_inner);
        let mut cached: Vec<i32> = years
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(&year, _)| year)
            .collect();
        cached.sort_unstable();
        cached
    }

    /// Forget one year, the next lookup fetches and builds it again
    ///
    /// Returns whether the year had been fetched.
    pub fn invalidate(&self, year: i32) -> bool {
        let mut years = self.years.write().unwrap_or_else(PoisonError::into_inner);
        years
            .remove(&year)
            .map_or(false, |slot| slot.get().is_some())
    }

    /// Forget every cached year
    pub fn clear(&self) {
        let mut years = self.years.write().unwrap_or_else(PoisonError::into_inner);
        years.clear();
    }

    pub fn guard(&self) -> &QuoteCurrencyGuard {
        &self.guard
    }

    pub fn format(&self) -> &TableFormat {
        &self.format
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn builder_for_year(&self, year: i32) -> Result<Arc<RateTableBuilder>> {
        let existing = self
            .years
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
            .cloned();

        let slot = match existing {
            Some(slot) => slot,
            None => {
                let mut years = self.years.write().unwrap_or_else(PoisonError::into_inner);
                Arc::clone(years.entry(year).or_insert_with(|| Arc::new(OnceCell::new())))
            }
        };

        let built = slot
            .get_or_try_init(|| {
                let content = self.source.fetch_year(year)?;
                log::debug!(
                    "Fetched {} bytes for {} from {}",
                    content.len(),
                    year,
                    self.source.describe()
                );
                Ok(Arc::new(RateTableBuilder::with_format(
                    content,
                    self.format.clone(),
                )))
            })
            .map(Arc::clone);

        if built.is_err() {
            self.forget_empty_slot(year, &slot);
        }
        built
    }

    /// Drop the slot of a year whose fetch failed, unless another thread
    /// has filled or replaced it meanwhile
    fn forget_empty_slot(&self, year: i32, slot: &YearSlot) {
        let mut years = self.years.write().unwrap_or_else(PoisonError::into_inner);
        let unused = years
            .get(&year)
            .map_or(false, |current| Arc::ptr_eq(current, slot) && current.get().is_none());
        if unused {
            years.remove(&year);
        }
    }
}

impl<S: ContentSource> RateHistory for HistoryProvider<S> {
    fn rate_at(&self, pair: &CurrencyPair, date: NaiveDate) -> Result<RateEntry> {
        self.fetch_rate(pair, date)
    }
}
