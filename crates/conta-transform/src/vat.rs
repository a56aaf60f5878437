//! VAT back-calculation from gross totals.

use conta_model::Result;
use conta_patterns::{VatConfig, VatMethod};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::group::TransactionGroup;
use crate::money::round_money;

/// Net base and tax value extracted from a gross amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VatSplit {
    pub base: Decimal,
    pub vat: Decimal,
}

/// Back-calculate base and VAT from a gross amount at the given rate.
///
/// The base is rounded half away from zero to 2 decimals and the VAT is
/// the exact remainder, so base + vat always reconstructs the gross.
pub fn standard_split(gross: Decimal, rate: u32) -> VatSplit {
    let divisor = Decimal::ONE + VatConfig::rate_fraction(rate);
    let base = round_money(gross / divisor);
    VatSplit {
        base,
        vat: gross - base,
    }
}

/// Per-rate gross portions of a group, as dictated by the VAT method.
#[derive(Debug, Clone, PartialEq)]
pub struct RatePortion {
    pub rate: u32,
    pub gross: Decimal,
}

/// Allocate the group's gross total across the configured rates.
///
/// The standard method books the full total under every configured rate,
/// which matches feeds where each receipt already carries a single rate.
/// The calibrated method splits a mixed-rate total between the first two
/// rates using the non-cash / cash ratio observed in historical ledgers.
pub fn allocate_rates(group: &TransactionGroup, vat: &VatConfig) -> Result<Vec<RatePortion>> {
    match vat.method {
        VatMethod::Standard => Ok(vat
            .rates
            .iter()
            .map(|&rate| RatePortion {
                rate,
                gross: group.total(),
            })
            .collect()),
        VatMethod::ReverseFromSample => {
            let total = group.total();
            let ratio = primary_rate_ratio(group.non_cash(), group.cash());
            let mut portions = Vec::with_capacity(vat.rates.len());
            let mut remainder = total;
            for (index, &rate) in vat.rates.iter().enumerate() {
                let gross = if index == 0 {
                    round_money(total * ratio)
                } else if index == vat.rates.len() - 1 {
                    remainder
                } else {
                    Decimal::ZERO
                };
                remainder -= gross;
                portions.push(RatePortion { rate, gross });
            }
            Ok(portions)
        }
    }
}

/// Fraction of the gross attributed to the primary rate, calibrated on the
/// relative weight of non cash receipts.
fn primary_rate_ratio(non_cash: Decimal, cash: Decimal) -> Decimal {
    let total = non_cash + cash;
    if total.is_zero() {
        return Decimal::ZERO;
    }
    let ncr = (non_cash / total).to_f64().unwrap_or(0.0);
    let cr = (cash / total).to_f64().unwrap_or(0.0);
    let ratio = if cr > 0.0 {
        (ncr.powi(2) * cr.powf(-0.5)).min(ncr.powf(1.5))
    } else {
        ncr.powf(1.5)
    };
    Decimal::from_f64(ratio.clamp(0.0, 1.0)).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn standard_split_reconstructs_gross() {
        let split = standard_split(dec!(176.00), 21);
        assert_eq!(split.base, dec!(145.45));
        assert_eq!(split.vat, dec!(30.55));
        assert_eq!(split.base + split.vat, dec!(176.00));
    }

    #[test]
    fn standard_split_reduced_rate() {
        let split = standard_split(dec!(111.00), 11);
        assert_eq!(split.base, dec!(100.00));
        assert_eq!(split.vat, dec!(11.00));
    }

    #[test]
    fn calibrated_portions_sum_to_total() {
        use chrono::NaiveDate;
        use conta_model::{CanonicalRecord, PaymentType};

        let records = vec![
            CanonicalRecord {
                transaction_id: 1,
                timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                payment_type: PaymentType::Card,
                amount: dec!(300.00),
            },
            CanonicalRecord {
                transaction_id: 2,
                timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 5, 0)
                    .unwrap(),
                payment_type: PaymentType::Numerar,
                amount: dec!(100.00),
            },
        ];
        let group = &crate::group::group_by_date(&records)[0];
        let vat = VatConfig {
            method: VatMethod::ReverseFromSample,
            rates: &[21, 11],
        };
        let portions = allocate_rates(group, &vat).unwrap();
        assert_eq!(portions.len(), 2);
        let sum: Decimal = portions.iter().map(|p| p.gross).sum();
        assert_eq!(sum, dec!(400.00));
        assert!(portions[0].gross > Decimal::ZERO);
        assert!(portions[1].gross > Decimal::ZERO);
    }

    #[test]
    fn all_cash_group_books_nothing_at_primary_rate() {
        assert_eq!(primary_rate_ratio(dec!(0), dec!(100)), Decimal::ZERO);
    }
}
