//! Integration tests for historical CNB rate lookups
//!
//! Runs the provider against recorded yearly files for 2014 and 2015.

use chrono::NaiveDate;
use rusty_fxhistory::prelude::*;
use std::fs;

const CNB_2014: &str = include_str!("fixtures/cnb_year_2014.txt");
const CNB_2015: &str = include_str!("fixtures/cnb_year_2015.txt");

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pair(s: &str) -> CurrencyPair {
    CurrencyPair::from_string(s).unwrap()
}

fn create_provider() -> HistoryProvider<StaticSource> {
    let source = StaticSource::new()
        .with_year(2014, CNB_2014)
        .with_year(2015, CNB_2015);
    HistoryProvider::new(source)
}

#[test]
fn test_fetches_recorded_rates() {
    let provider = create_provider();

    let cases = vec![
        ("EUR/CZK", date(2015, 1, 30), "27.795"),
        ("AUD/CZK", date(2015, 1, 2), "18.665"),
        ("GBP/CZK", date(2015, 1, 20), "36.457"),
        ("USD/CZK", date(2014, 12, 23), "22.645"),
    ];

    for (pair_text, rate_date, expected) in cases {
        let rate = provider.fetch_rate(&pair(pair_text), rate_date).unwrap();
        assert_eq!(rate.value.to_string(), expected, "{} at {}", pair_text, rate_date);
        assert_eq!(rate.date, rate_date);
    }
}

#[test]
fn test_unit_base_normalization() {
    let provider = create_provider();

    let jpy = provider.fetch_rate(&pair("JPY/CZK"), date(2015, 1, 20)).unwrap();
    assert_eq!(jpy.to_string(), "27.68");
}

#[test]
fn test_throws_when_quote_is_not_czk() {
    let provider = create_provider();

    let err = provider
        .fetch_rate(&pair("CZK/EUR"), date(2014, 1, 1))
        .unwrap_err();
    assert!(matches!(err, FxHistoryError::UnsupportedPair { .. }));
}

#[test]
fn test_throws_when_pair_is_not_supported() {
    let provider = create_provider();

    let err = provider
        .fetch_rate(&pair("XXX/TRY"), date(2014, 1, 1))
        .unwrap_err();
    assert!(matches!(err, FxHistoryError::UnsupportedPair { .. }));
    assert_eq!(provider.source().fetch_count(), 0);
}

#[test]
fn test_weekend_is_not_available() {
    let provider = create_provider();

    let err = provider
        .fetch_rate(&pair("EUR/CZK"), date(2015, 1, 3))
        .unwrap_err();
    assert!(matches!(err, FxHistoryError::DateNotAvailable { .. }));
    assert!(err.to_string().contains("2015-01-03"));
}

#[test]
fn test_unknown_currency_is_not_found() {
    let provider = create_provider();

    let err = provider
        .fetch_rate(&pair("ISK/CZK"), date(2015, 1, 2))
        .unwrap_err();
    assert!(matches!(err, FxHistoryError::CurrencyNotFound { .. }));
    assert!(err.to_string().contains("ISK"));
}

#[test]
fn test_new_year_falls_back_to_previous_year() {
    let provider = create_provider();

    let rate = provider
        .fetch_rate_or_previous(&pair("EUR/CZK"), date(2015, 1, 1), 7)
        .unwrap();
    assert_eq!(rate.date, date(2014, 12, 31));
    assert_eq!(provider.cached_years(), vec![2014, 2015]);
}

#[test]
fn test_each_year_fetched_once() {
    let provider = create_provider();

    for day in [2, 5, 6, 7, 30] {
        provider.fetch_rate(&pair("EUR/CZK"), date(2015, 1, day)).unwrap();
    }
    provider.fetch_rate(&pair("USD/CZK"), date(2014, 12, 23)).unwrap();

    assert_eq!(provider.source().fetch_count(), 2);
}

#[test]
fn test_fixture_table_shape() {
    let table = rusty_fxhistory::table::build(CNB_2015).unwrap();

    // 21 working days in January 2015 up to the 30th
    assert_eq!(table.len(), 21);
    assert_eq!(table.headers().len(), 1);
    assert_eq!(table.headers()[0].len(), 23);
    assert_eq!(table.num_entries(), 21 * 23);
    assert_eq!(table.dates().first(), Some(&date(2015, 1, 2)));
    assert_eq!(table.dates().last(), Some(&date(2015, 1, 30)));
}

#[test]
fn test_directory_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cnb_year_2015.txt"), CNB_2015).unwrap();

    let provider = HistoryProvider::new(DirectorySource::new(dir.path()));

    let rate = provider.fetch_rate(&pair("EUR/CZK"), date(2015, 1, 30)).unwrap();
    assert_eq!(rate.to_string(), "27.795");

    let err = provider
        .fetch_rate(&pair("EUR/CZK"), date(2014, 12, 23))
        .unwrap_err();
    assert!(matches!(err, FxHistoryError::IoError(_)));
}

#[test]
fn test_builder_against_fixture() {
    let builder = RateTableBuilder::new(CNB_2015);

    let first = builder.lookup(date(2015, 1, 30), "EUR").unwrap();
    let second = builder.lookup(date(2015, 1, 30), "EUR").unwrap();

    assert_eq!(first, second);
    assert_eq!(builder.build_count(), 1);
}
