//! Source file dialect

use serde::{Deserialize, Serialize};

/// Describes how a yearly rate table is laid out
///
/// The default is the Czech National Bank dialect:
///
/// ```text
/// Datum|1 AUD|1 EUR|100 JPY
/// 02.01.2015|18,665|27,725|18,939
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFormat {
    /// Field separator within a line
    pub delimiter: char,
    /// Separator between unit base and code in a header field
    pub header_separator: char,
    /// Decimal separator used by numeric fields
    pub decimal_separator: char,
    /// chrono format of the row date field
    pub date_format: String,
}

impl TableFormat {
    /// Czech National Bank yearly `year.txt` files
    pub fn cnb() -> Self {
        Self {
            delimiter: '|',
            header_separator: ' ',
            decimal_separator: ',',
            date_format: "%d.%m.%Y".to_string(),
        }
    }

    /// Rewrite a numeric field to use `.` as decimal separator
    pub(crate) fn normalize_decimal(&self, field: &str) -> String {
        let field = field.trim();
        if self.decimal_separator == '.' {
            field.to_string()
        } else {
            field.replace(self.decimal_separator, ".")
        }
    }
}

impl Default for TableFormat {
    fn default() -> Self {
        Self::cnb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_decimal() {
        let format = TableFormat::cnb();
        assert_eq!(format.normalize_decimal("27,795"), "27.795");
        assert_eq!(format.normalize_decimal(" 2768,00 "), "2768.00");
    }
}
