//! Currency codes and currency pairs

use crate::error::{FxHistoryError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Currency code as published in a rate table (e.g. `EUR`, `CZK`)
///
/// Codes are case-sensitive and must be non-empty ASCII alphabetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Czech koruna, quote currency of the CNB tables
    pub const CZK: &'static str = "CZK";

    /// Create a code, validating its characters
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FxHistoryError::InvalidCurrency(format!(
                "'{}' is not an alphabetic currency code",
                code
            )));
        }
        Ok(Self(code))
    }

    /// Czech koruna
    pub fn czk() -> Self {
        Self(Self::CZK.to_string())
    }

    /// Get the code as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = FxHistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FxHistoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by code be queried with a plain &str
impl Borrow<str> for CurrencyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Currency pair for exchange rates
///
/// The rate of a pair is the price of one unit of `base` in `quote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// Create a pair from raw codes
    pub fn from_codes(base: &str, quote: &str) -> Result<Self> {
        Ok(Self::new(CurrencyCode::new(base)?, CurrencyCode::new(quote)?))
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Parse from string (e.g., "EUR/CZK" or "EURCZK")
    pub fn from_string(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains('/') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 2 {
                return Err(FxHistoryError::InvalidCurrency(format!(
                    "Invalid currency pair format: {}",
                    s
                )));
            }
            Self::from_codes(parts[0].trim(), parts[1].trim())
        } else if s.len() == 6 && s.is_ascii() {
            // Format: EURCZK (3 chars each)
            Self::from_codes(&s[0..3], &s[3..6])
        } else {
            Err(FxHistoryError::InvalidCurrency(format!(
                "Invalid currency pair format: {}",
                s
            )))
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = FxHistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
