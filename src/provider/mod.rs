//! Rate providers
//!
//! Glue between content sources and the table engine:
//! - **guard**: quote currency precondition
//! - **history**: per-year cached provider
//!
//! # Example
//!
//! ```rust
//! use rusty_fxhistory::provider::{convert_amount, HistoryProvider};
//! use rusty_fxhistory::source::StaticSource;
//! use rusty_fxhistory::currency::CurrencyPair;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let source = StaticSource::new().with_year(2015, "Datum|1 EUR\n30.01.2015|27,795\n");
//! let provider = HistoryProvider::new(source);
//! let pair = CurrencyPair::from_string("EUR/CZK").unwrap();
//! let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
//!
//! let czk = convert_amount(&provider, Decimal::from(100), &pair, date).unwrap();
//! assert_eq!(czk.to_string(), "2779.5");
//! ```

pub mod guard;
pub mod history;

pub use guard::QuoteCurrencyGuard;
pub use history::HistoryProvider;

use crate::currency::CurrencyPair;
use crate::error::{FxHistoryError, Result};
use crate::table::RateEntry;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for reading historical rates
pub trait RateHistory: Send + Sync {
    /// Rate of `pair.base` in `pair.quote` on `date`
    fn rate_at(&self, pair: &CurrencyPair, date: NaiveDate) -> Result<RateEntry>;

    /// Get multiple rates for one date (batch query)
    fn rates_at(&self, pairs: &[CurrencyPair], date: NaiveDate) -> Result<Vec<RateEntry>> {
        pairs.iter().map(|pair| self.rate_at(pair, date)).collect()
    }

    /// Check if rate is available
    fn has_rate(&self, pair: &CurrencyPair, date: NaiveDate) -> bool {
        self.rate_at(pair, date).is_ok()
    }
}

/// Convert an amount of `pair.base` into `pair.quote` at the rate of `date`
///
/// Fails with [`FxHistoryError::ConversionOverflow`] when the product does not
/// fit in a [`Decimal`].
pub fn convert_amount<R: RateHistory + ?Sized>(
    history: &R,
    amount: Decimal,
    pair: &CurrencyPair,
    date: NaiveDate,
) -> Result<Decimal> {
    let rate = history.rate_at(pair, date)?;
    amount
        .checked_mul(rate.value)
        .map(|converted| converted.normalize())
        .ok_or_else(|| FxHistoryError::ConversionOverflow {
            amount: amount.to_string(),
            pair: pair.to_string(),
            rate: rate.value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn provider() -> HistoryProvider<StaticSource> {
        HistoryProvider::new(
            StaticSource::new().with_year(2015, "Datum|1 EUR\n30.01.2015|27,795\n"),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 30).unwrap()
    }

    #[test]
    fn test_convert_amount() {
        let pair = CurrencyPair::from_string("EUR/CZK").unwrap();
        let czk = convert_amount(&provider(), Decimal::new(250, 2), &pair, date()).unwrap();
        assert_eq!(czk.to_string(), "69.4875");
    }

    #[test]
    fn test_convert_amount_overflow() {
        let pair = CurrencyPair::from_string("EUR/CZK").unwrap();
        let err = convert_amount(&provider(), Decimal::MAX, &pair, date()).unwrap_err();

        assert!(matches!(err, FxHistoryError::ConversionOverflow { .. }));
        assert!(err.to_string().contains("EUR/CZK"));
    }

    #[test]
    fn test_convert_amount_propagates_lookup_miss() {
        let pair = CurrencyPair::from_string("EUR/CZK").unwrap();
        let saturday = NaiveDate::from_ymd_opt(2015, 1, 31).unwrap();
        let err = convert_amount(&provider(), Decimal::ONE, &pair, saturday).unwrap_err();
        assert!(matches!(err, FxHistoryError::DateNotAvailable { .. }));
    }
}
