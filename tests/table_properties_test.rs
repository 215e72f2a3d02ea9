//! Property tests for table parsing

use approx::assert_relative_eq;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rusty_fxhistory::table::{build, lookup, RateTableBuilder};

const COLUMNS: [(&str, u32, &str); 6] = [
    ("AUD", 1, "18,665"),
    ("EUR", 1, "27,795"),
    ("HUF", 100, "8,734"),
    ("IDR", 1000, "1,834"),
    ("JPY", 100, "2768,00"),
    ("USD", 1, "22,645"),
];

fn render(columns: &[(&str, u32, &str)], date: &str) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|(code, base, _)| format!("{} {}", base, code))
        .collect();
    let row: Vec<&str> = columns.iter().map(|(_, _, raw)| *raw).collect();
    format!("Datum|{}\n{}|{}\n", header.join("|"), date, row.join("|"))
}

fn expected(raw: &str, base: u32) -> Decimal {
    let raw: Decimal = raw.replace(',', ".").parse().unwrap();
    (raw / Decimal::from(base)).normalize()
}

proptest! {
    #[test]
    fn column_order_does_not_change_values(columns in Just(COLUMNS.to_vec()).prop_shuffle()) {
        let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();
        let table = build(&render(&columns, "30.01.2015")).unwrap();

        for (code, base, raw) in COLUMNS.iter() {
            let entry = lookup(&table, date, code).unwrap();
            prop_assert_eq!(entry.value, expected(raw, *base));
        }
    }

    #[test]
    fn value_is_raw_field_over_unit_base(
        mantissa in 1i64..100_000_000,
        base in prop::sample::select(vec![1u32, 100, 1000]),
    ) {
        let raw = Decimal::new(mantissa, 3);
        let field = raw.to_string().replace('.', ",");
        let content = format!("Datum|{} XYZ\n02.01.2015|{}\n", base, field);

        let builder = RateTableBuilder::new(content);
        let date = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
        let entry = builder.lookup(date, "XYZ").unwrap();

        prop_assert_eq!(entry.value * Decimal::from(base), raw);
        prop_assert_eq!(builder.build_count(), 1);
    }

    #[test]
    fn short_content_is_empty_table(line in "[^\n]*") {
        let table = build(&line);
        // A single line is never parsed, whatever it contains
        prop_assert!(table.unwrap().is_empty());
    }
}

#[test]
fn test_reference_values() {
    let table = build(&render(&COLUMNS, "30.01.2015")).unwrap();
    let date = NaiveDate::from_ymd_opt(2015, 1, 30).unwrap();

    assert_eq!(lookup(&table, date, "EUR").unwrap().to_string(), "27.795");
    assert_eq!(lookup(&table, date, "JPY").unwrap().to_string(), "27.68");
    assert_relative_eq!(lookup(&table, date, "HUF").unwrap().as_f64(), 0.08734, max_relative = 1e-12);
    assert_relative_eq!(lookup(&table, date, "IDR").unwrap().as_f64(), 0.001834, max_relative = 1e-12);
}
