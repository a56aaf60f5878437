//! Grouping of canonical records into per-date payment buckets.
//!
//! The downstream import expects one document per transaction date: every
//! Z-report of a day folds into one grouped row, with each payment amount
//! accumulated into its bucket. The lowest Z number of the day becomes the
//! document number, which keeps the output deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use conta_model::{CanonicalRecord, PaymentType};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionGroup {
    pub document_number: i64,
    pub date: NaiveDate,
    buckets: BTreeMap<PaymentType, Decimal>,
}

impl TransactionGroup {
    pub fn bucket(&self, payment_type: PaymentType) -> Decimal {
        self.buckets
            .get(&payment_type)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Gross document total: the sum of all bucket magnitudes.
    pub fn total(&self) -> Decimal {
        self.buckets.values().map(|v| v.abs()).sum()
    }

    /// Cash portion (NUMERAR).
    pub fn cash(&self) -> Decimal {
        self.bucket(PaymentType::Numerar).abs()
    }

    /// Card plus cheque portion, used by the calibrated VAT allocation.
    pub fn non_cash(&self) -> Decimal {
        self.bucket(PaymentType::Card).abs() + self.bucket(PaymentType::Cec).abs()
    }

    pub fn date_key(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

/// Fold records into date groups, ordered by date.
pub fn group_by_date(records: &[CanonicalRecord]) -> Vec<TransactionGroup> {
    let mut groups: BTreeMap<NaiveDate, TransactionGroup> = BTreeMap::new();

    for record in records {
        let group = groups
            .entry(record.date())
            .or_insert_with(|| TransactionGroup {
                document_number: record.transaction_id,
                date: record.date(),
                buckets: BTreeMap::new(),
            });
        group.document_number = group.document_number.min(record.transaction_id);
        *group
            .buckets
            .entry(record.payment_type)
            .or_insert(Decimal::ZERO) += record.amount;
    }

    let grouped: Vec<TransactionGroup> = groups.into_values().collect();
    debug!(records = records.len(), groups = grouped.len(), "grouped records");
    grouped
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn record(id: i64, day: u32, payment_type: PaymentType, amount: Decimal) -> CanonicalRecord {
        CanonicalRecord {
            transaction_id: id,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            payment_type,
            amount,
        }
    }

    #[test]
    fn same_date_records_fold_into_one_group() {
        let groups = group_by_date(&[
            record(1, 10, PaymentType::Card, dec!(121.00)),
            record(2, 10, PaymentType::Cec, dec!(55.00)),
        ]);
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.document_number, 1);
        assert_eq!(group.bucket(PaymentType::Card), dec!(121.00));
        assert_eq!(group.bucket(PaymentType::Cec), dec!(55.00));
        assert_eq!(group.bucket(PaymentType::Numerar), dec!(0));
        assert_eq!(group.total(), dec!(176.00));
    }

    #[test]
    fn amounts_accumulate_within_a_bucket() {
        let groups = group_by_date(&[
            record(3, 11, PaymentType::Card, dec!(10.00)),
            record(4, 11, PaymentType::Card, dec!(15.50)),
        ]);
        assert_eq!(groups[0].bucket(PaymentType::Card), dec!(25.50));
        assert_eq!(groups[0].document_number, 3);
    }

    #[test]
    fn groups_are_ordered_by_date() {
        let groups = group_by_date(&[
            record(9, 12, PaymentType::Card, dec!(1.00)),
            record(1, 10, PaymentType::Card, dec!(1.00)),
        ]);
        assert_eq!(groups[0].date_key(), "20250110");
        assert_eq!(groups[1].date_key(), "20250112");
    }
}
