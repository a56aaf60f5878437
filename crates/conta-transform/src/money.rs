use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half away from zero (the downstream
/// accounting convention, not banker's rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed two-decimal rendering for output cells.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.005)), dec!(2.01));
        assert_eq!(round_money(dec!(-2.005)), dec!(-2.01));
        assert_eq!(round_money(dec!(2.004)), dec!(2.00));
    }

    #[test]
    fn format_always_shows_two_decimals() {
        assert_eq!(format_money(dec!(121)), "121.00");
        assert_eq!(format_money(dec!(30.549)), "30.55");
        assert_eq!(format_money(dec!(0)), "0.00");
    }
}
