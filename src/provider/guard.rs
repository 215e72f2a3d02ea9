//! Quote currency precondition

use crate::currency::{CurrencyCode, CurrencyPair};
use crate::error::{FxHistoryError, Result};

/// Rejects pairs not quoted against the currency a table publishes against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteCurrencyGuard {
    quote: CurrencyCode,
}

impl QuoteCurrencyGuard {
    pub fn new(quote: CurrencyCode) -> Self {
        Self { quote }
    }

    /// Guard for CNB tables, which quote against CZK
    pub fn czk() -> Self {
        Self::new(CurrencyCode::czk())
    }

    pub fn quote(&self) -> &CurrencyCode {
        &self.quote
    }

    pub fn supports(&self, pair: &CurrencyPair) -> bool {
        pair.quote == self.quote
    }

    pub fn check(&self, pair: &CurrencyPair) -> Result<()> {
        if self.supports(pair) {
            Ok(())
        } else {
            Err(FxHistoryError::UnsupportedPair {
                pair: pair.to_string(),
                expected_quote: self.quote.to_string(),
            })
        }
    }
}

impl Default for QuoteCurrencyGuard {
    fn default() -> Self {
        Self::czk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_czk_quote() {
        let guard = QuoteCurrencyGuard::czk();
        let pair = CurrencyPair::from_codes("EUR", "CZK").unwrap();
        assert!(guard.check(&pair).is_ok());
    }

    #[test]
    fn test_rejects_other_quotes() {
        let guard = QuoteCurrencyGuard::czk();

        for (base, quote) in [("CZK", "EUR"), ("XXX", "TRY")] {
            let pair = CurrencyPair::from_codes(base, quote).unwrap();
            let err = guard.check(&pair).unwrap_err();
            assert!(matches!(err, FxHistoryError::UnsupportedPair { .. }));
            assert!(!err.is_not_found());
        }
    }

    #[test]
    fn test_custom_quote() {
        let guard = QuoteCurrencyGuard::new(CurrencyCode::new("PLN").unwrap());
        assert!(guard.supports(&CurrencyPair::from_codes("EUR", "PLN").unwrap()));
        assert!(!guard.supports(&CurrencyPair::from_codes("EUR", "CZK").unwrap()));
    }
}
