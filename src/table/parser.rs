//! Row parsing: raw yearly content -> [`RateTable`]

use super::format::TableFormat;
use super::header::{parse_header_with, HeaderIndex};
use super::rate_table::{RateEntry, RateTable};
use crate::error::{FxHistoryError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Build a table from one block of content using the default (CNB) dialect
pub fn build(content: &str) -> Result<RateTable> {
    build_table(content, &TableFormat::default())
}

/// Build a table from one block of content
///
/// Line 0 is the header. Content with fewer than two lines yields an empty
/// table. Empty lines are skipped, and a line whose first field repeats the
/// header's date label starts a new header block for the rows that follow.
/// A row with an unparsable date or rate fails the whole build.
pub fn build_table(content: &str, format: &TableFormat) -> Result<RateTable> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut table = RateTable::new();

    if lines.len() < 2 {
        log::debug!("Content has no data rows, returning empty table");
        return Ok(table);
    }

    let mut header = parse_header_with(lines[0], format)?;
    let mut skipped_fields = 0usize;

    for (i, raw_line) in lines.iter().enumerate().skip(1) {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(format.delimiter).collect();
        let first = fields[0].trim();

        if !header.label().is_empty() && first == header.label() {
            table.push_header(header);
            header = parse_header_with(line, format)?;
            continue;
        }

        let date = parse_row_date(first, format).map_err(|reason| FxHistoryError::MalformedRow {
            line: i + 1,
            reason,
        })?;
        table.insert_date(date);

        skipped_fields += parse_row_values(&mut table, &header, &fields, date, format).map_err(
            |reason| FxHistoryError::MalformedRow {
                line: i + 1,
                reason,
            },
        )?;
    }
    table.push_header(header);

    if skipped_fields > 0 {
        log::debug!("Skipped {} empty rate fields", skipped_fields);
    }
    log::debug!(
        "Built rate table: {} dates, {} entries from {} lines",
        table.len(),
        table.num_entries(),
        lines.len()
    );

    Ok(table)
}

fn parse_row_date(field: &str, format: &TableFormat) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(field, &format.date_format)
        .map_err(|e| format!("invalid date '{}': {}", field, e))
}

/// Store every currency of `header` found in the row, returns how many
/// fields were missing or empty
fn parse_row_values(
    table: &mut RateTable,
    header: &HeaderIndex,
    fields: &[&str],
    date: NaiveDate,
    format: &TableFormat,
) -> std::result::Result<usize, String> {
    let mut skipped = 0;

    for column in header.iter() {
        let raw = match fields.get(column.column_index).map(|f| f.trim()) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let value = Decimal::from_str(&format.normalize_decimal(raw)).map_err(|e| {
            format!(
                "invalid rate '{}' for {}: {}",
                raw, column.currency_code, e
            )
        })?;
        let value = (value / Decimal::from(column.unit_base)).normalize();

        table.insert(column.currency_code.clone(), RateEntry::new(value, date));
    }

    Ok(skipped)
}
