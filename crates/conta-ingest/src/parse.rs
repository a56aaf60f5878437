//! Deterministic cell parsing against pattern-declared types.
//!
//! No type guessing: each helper parses one expected shape and returns
//! `None` on anything else, which the normalizer converts into a
//! `ValueParse` error with the row/column location.

use chrono::{NaiveDate, NaiveDateTime};
use conta_patterns::NumberStyle;
use rust_decimal::Decimal;

/// Parse a monetary amount using the source file's separator convention.
pub fn parse_decimal(raw: &str, style: NumberStyle) -> Option<Decimal> {
    let trimmed: String = raw.trim().chars().filter(|c| *c != ' ').collect();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = match style {
        NumberStyle::DotDecimal => trimmed.replace(',', ""),
        NumberStyle::CommaDecimal => trimmed.replace('.', "").replace(',', "."),
    };
    normalized.parse::<Decimal>().ok()
}

/// Parse an integer id. POS exports round-trip ids through Excel floats,
/// so "15.0" still reads as 15.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let f = trimmed.parse::<f64>().ok()?;
    (f.fract() == 0.0 && f.abs() < 9e15).then_some(f as i64)
}

/// Try each configured format in order, first as a datetime and then as a
/// bare date (midnight).
pub fn parse_datetime(raw: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn dot_decimal_strips_thousands_commas() {
        assert_eq!(
            parse_decimal("1,234.56", NumberStyle::DotDecimal),
            Some(dec!(1234.56))
        );
        assert_eq!(
            parse_decimal("-55.00", NumberStyle::DotDecimal),
            Some(dec!(-55.00))
        );
        assert_eq!(parse_decimal("abc", NumberStyle::DotDecimal), None);
        assert_eq!(parse_decimal("", NumberStyle::DotDecimal), None);
    }

    #[test]
    fn comma_decimal_swaps_separators() {
        assert_eq!(
            parse_decimal("1.234,56", NumberStyle::CommaDecimal),
            Some(dec!(1234.56))
        );
        assert_eq!(
            parse_decimal("55,5", NumberStyle::CommaDecimal),
            Some(dec!(55.5))
        );
    }

    #[test]
    fn integer_accepts_excel_float_form() {
        assert_eq!(parse_integer("15"), Some(15));
        assert_eq!(parse_integer("15.0"), Some(15));
        assert_eq!(parse_integer("15.5"), None);
        assert_eq!(parse_integer("Total:"), None);
    }

    #[test]
    fn datetime_tries_formats_in_order() {
        let formats = &["%d-%b-%y %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];
        assert_eq!(
            parse_datetime("10-Jan-25 10:00:00", formats)
                .unwrap()
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            "2025-01-10 10:00"
        );
        assert_eq!(
            parse_datetime("2025-01-10", formats)
                .unwrap()
                .format("%H:%M:%S")
                .to_string(),
            "00:00:00"
        );
        assert!(parse_datetime("10/01/2025", formats).is_none());
    }
}
