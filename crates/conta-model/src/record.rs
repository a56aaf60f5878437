use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::PaymentType;

/// One normalized input row from a POS payment export.
///
/// Created by the normalizer from one raw row and never mutated afterwards;
/// the transform engine consumes records and produces fresh output rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub transaction_id: i64,
    pub timestamp: NaiveDateTime,
    pub payment_type: PaymentType,
    pub amount: Decimal,
}

impl CanonicalRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Document-date key in the `yyyymmdd` form the import format uses.
    pub fn date_key(&self) -> String {
        self.date().format("%Y%m%d").to_string()
    }
}

/// One normalized row from the cleaned Borderou artifact.
///
/// Borderou rows arrive with the VAT decomposition already present in the
/// source workbook, so unlike [`CanonicalRecord`] they carry per-rate bases
/// and VAT values instead of a payment bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderouRecord {
    pub document_number: i64,
    pub date: NaiveDate,
    /// Free-text note ("Explicatii") used by the business-unit split rules.
    pub note: String,
    pub total_value: Decimal,
    pub non_taxable_base: Decimal,
    pub vat21_base: Decimal,
    pub vat21_value: Decimal,
    pub vat11_base: Decimal,
    pub vat11_value: Decimal,
}

impl BorderouRecord {
    /// Total net of the non-taxable portion; equals the sum of the taxable
    /// bases plus their VAT when the source decomposition is consistent.
    pub fn taxable_total(&self) -> Decimal {
        self.total_value - self.non_taxable_base
    }

    pub fn date_key(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn date_key_is_compact_iso() {
        let record = CanonicalRecord {
            transaction_id: 1,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            payment_type: PaymentType::Card,
            amount: dec!(121.00),
        };
        assert_eq!(record.date_key(), "20250110");
    }

    #[test]
    fn taxable_total_subtracts_non_taxable() {
        let record = BorderouRecord {
            document_number: 15001,
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            note: String::new(),
            total_value: dec!(1000.00),
            non_taxable_base: dec!(100.00),
            vat21_base: dec!(600.00),
            vat21_value: dec!(126.00),
            vat11_base: dec!(156.76),
            vat11_value: dec!(17.24),
        };
        assert_eq!(record.taxable_total(), dec!(900.00));
    }
}
