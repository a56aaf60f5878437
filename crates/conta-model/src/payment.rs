use serde::{Deserialize, Serialize};

/// Payment instrument reported by the POS export ("Tip Incasare").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    Card,
    Cec,
    Numerar,
    Tichete,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        PaymentType::Card,
        PaymentType::Cec,
        PaymentType::Numerar,
        PaymentType::Tichete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "CARD",
            Self::Cec => "CEC",
            Self::Numerar => "NUMERAR",
            Self::Tichete => "TICHETE",
        }
    }

    /// Parse the POS label. Returns `None` for anything outside the known
    /// set; the normalizer turns that into a `ValueParse` error rather than
    /// guessing a bucket.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "CARD" => Some(Self::Card),
            "CEC" => Some(Self::Cec),
            "NUMERAR" | "CASH" => Some(Self::Numerar),
            "TICHETE" => Some(Self::Tichete),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(PaymentType::parse("card"), Some(PaymentType::Card));
        assert_eq!(PaymentType::parse(" Numerar "), Some(PaymentType::Numerar));
        assert_eq!(PaymentType::parse("CASH"), Some(PaymentType::Numerar));
        assert_eq!(PaymentType::parse("VOUCHER"), None);
    }
}
