//! Error types for rusty_fxhistory

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for rate table parsing and lookups
#[derive(Error, Debug)]
pub enum FxHistoryError {
    /// Header line does not follow the `"<unitBase> <code>"` field contract
    #[error("Malformed header at field {field}: {reason}")]
    MalformedHeader { field: usize, reason: String },

    /// A data row could not be parsed
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Table is valid but has no row for the requested date
    #[error("Rate at {date} not available")]
    DateNotAvailable { date: NaiveDate },

    /// Date row exists but the currency was not published for it
    #[error("Rate at {date} for '{currency}' not found")]
    CurrencyNotFound { date: NaiveDate, currency: String },

    /// Pair is quoted against a currency the table does not publish against
    #[error("Unsupported currency pair {pair}: quote currency must be {expected_quote}")]
    UnsupportedPair { pair: String, expected_quote: String },

    /// Converted amount does not fit in a decimal
    #[error("Converting {amount} {pair} at {rate} overflows")]
    ConversionOverflow {
        amount: String,
        pair: String,
        rate: String,
    },

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FxHistoryError {
    /// True for the two recoverable lookup misses
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FxHistoryError::DateNotAvailable { .. } | FxHistoryError::CurrencyNotFound { .. }
        )
    }

    /// True for structural errors raised while building a table
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FxHistoryError::MalformedHeader { .. } | FxHistoryError::MalformedRow { .. }
        )
    }
}

/// Result type alias for rusty_fxhistory operations
pub type Result<T> = std::result::Result<T, FxHistoryError>;
