//! Header row parsing
//!
//! The first line of a yearly table names the date column and then one
//! column per currency, each written as `"<unitBase> <code>"`:
//!
//! ```text
//! Datum|1 AUD|1 EUR|100 HUF|100 JPY
//! ```

use super::format::TableFormat;
use crate::currency::CurrencyCode;
use crate::error::{FxHistoryError, Result};
use hashbrown::HashMap;
use serde::Serialize;

/// One currency column of a rate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyColumn {
    pub currency_code: CurrencyCode,
    /// 1-based field position within a row
    pub column_index: usize,
    /// Quotation denominator, the raw field is the price of this many units
    pub unit_base: u32,
}

/// Currency code -> column mapping of one header line, in column order
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    label: String,
    columns: Vec<CurrencyColumn>,
    by_code: HashMap<CurrencyCode, usize>,
}

impl HeaderIndex {
    /// Label of the date column (field 0, `Datum` in CNB files)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column for a currency code
    pub fn get(&self, code: &str) -> Option<&CurrencyColumn> {
        self.by_code.get(code).map(|&i| &self.columns[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Columns in the order they appear in the header
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyColumn> {
        self.columns.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.columns.iter().map(|c| &c.currency_code)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Parse a header line with the default (CNB) dialect
pub fn parse_header(line: &str) -> Result<HeaderIndex> {
    parse_header_with(line, &TableFormat::default())
}

/// Parse a header line into a [`HeaderIndex`]
///
/// Every field after the first must be exactly two tokens, a positive integer
/// unit base followed by an alphabetic currency code. Any violation fails the
/// whole header.
pub fn parse_header_with(line: &str, format: &TableFormat) -> Result<HeaderIndex> {
    let line = line.trim_end_matches('\r');
    let mut fields = line.split(format.delimiter);

    let label = fields.next().unwrap_or_default().trim().to_string();
    let mut index = HeaderIndex {
        label,
        ..HeaderIndex::default()
    };

    for (i, field) in fields.enumerate() {
        let column_index = i + 1;
        let column = parse_column(field, column_index, format)?;

        if index.by_code.contains_key(&column.currency_code) {
            return Err(FxHistoryError::MalformedHeader {
                field: column_index,
                reason: format!("duplicate currency code '{}'", column.currency_code),
            });
        }

        index
            .by_code
            .insert(column.currency_code.clone(), index.columns.len());
        index.columns.push(column);
    }

    Ok(index)
}

fn parse_column(field: &str, column_index: usize, format: &TableFormat) -> Result<CurrencyColumn> {
    let malformed = |reason: String| FxHistoryError::MalformedHeader {
        field: column_index,
        reason,
    };

    let tokens: Vec<&str> = field.split(format.header_separator).collect();
    let (base, code) = match tokens.as_slice() {
        [base, code] => (*base, *code),
        _ => {
            return Err(malformed(format!(
                "expected '<unitBase> <code>', got '{}'",
                field
            )))
        }
    };

    let unit_base: u32 = base
        .parse()
        .map_err(|_| malformed(format!("unit base '{}' is not a number", base)))?;
    if unit_base == 0 {
        return Err(malformed("unit base must be positive".to_string()));
    }

    let currency_code =
        CurrencyCode::new(code).map_err(|e| malformed(e.to_string()))?;

    Ok(CurrencyColumn {
        currency_code,
        column_index,
        unit_base,
    })
}
