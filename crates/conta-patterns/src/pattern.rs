use conta_model::{ConvError, OutputSchema, PaymentType, Result};
use rust_decimal::Decimal;

/// Which processing family a pattern belongs to. Matching is always scoped
/// to one family so a Borderou file can never select a CardCec pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    CardCec,
    Borderou,
}

/// Canonical-field to source-header mapping for POS payment exports.
#[derive(Debug, Clone, Copy)]
pub struct PaymentColumns {
    pub transaction_id: &'static str,
    pub date: &'static str,
    pub payment_type: &'static str,
    pub amount: &'static str,
}

impl PaymentColumns {
    pub fn all(&self) -> [&'static str; 4] {
        [self.transaction_id, self.date, self.payment_type, self.amount]
    }
}

/// Canonical-field mapping for the cleaned Borderou artifact.
#[derive(Debug, Clone, Copy)]
pub struct BorderouColumns {
    pub document_number: &'static str,
    pub date: &'static str,
    pub note: &'static str,
    pub total_value: &'static str,
    pub non_taxable_base: &'static str,
    pub vat21_base: &'static str,
    pub vat21_value: &'static str,
    pub vat11_base: &'static str,
    pub vat11_value: &'static str,
}

impl BorderouColumns {
    pub fn all(&self) -> [&'static str; 9] {
        [
            self.document_number,
            self.date,
            self.note,
            self.total_value,
            self.non_taxable_base,
            self.vat21_base,
            self.vat21_value,
            self.vat11_base,
            self.vat11_value,
        ]
    }
}

/// Source columns the pattern declares; each family declares a fixed set.
#[derive(Debug, Clone, Copy)]
pub enum SourceColumns {
    Payments(PaymentColumns),
    Borderou(BorderouColumns),
}

impl SourceColumns {
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Self::Payments(c) => c.all().to_vec(),
            Self::Borderou(c) => c.all().to_vec(),
        }
    }
}

/// Decimal-separator convention of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// `1,234.56` — dot decimal, optional comma thousands.
    DotDecimal,
    /// `1.234,56` — comma decimal, optional dot thousands.
    CommaDecimal,
}

/// How a gross total is decomposed into net base and VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VatMethod {
    /// base = round(total / (1 + rate), 2), vat = total - base.
    Standard,
    /// Calibrated allocation matching the observed reference export: the
    /// 21% rows receive total * min(ncr^2 * cr^-0.5, ncr^1.5) where ncr is
    /// the non-cash share and cr the cash share, the 11% rows the remainder.
    /// This is a documented reconciliation policy, not a recomputation.
    ReverseFromSample,
}

/// VAT configuration: split method plus the rate set (percent values).
#[derive(Debug, Clone, Copy)]
pub struct VatConfig {
    pub method: VatMethod,
    pub rates: &'static [u32],
}

impl VatConfig {
    /// Rate as a fraction, e.g. 21 -> 0.21.
    pub fn rate_fraction(rate: u32) -> Decimal {
        Decimal::from(rate) / Decimal::ONE_HUNDRED
    }
}

/// Fixed values and naming for the produced import file.
#[derive(Debug, Clone, Copy)]
pub struct OutputProfile {
    /// Document series ("Serie document"); split patterns append the unit id.
    pub serie: &'static str,
    /// Article base name ("denumire articol"), suffixed with the VAT rate.
    pub denumire: &'static str,
    pub cod_depozit: &'static str,
    /// SAF-T VAT code per rate; empty string means manual entry downstream.
    pub saft_codes: &'static [(u32, &'static str)],
    /// Output file name; `{unit}` is replaced for split outputs.
    pub output_name: &'static str,
    pub format: TargetFormat,
}

impl OutputProfile {
    pub fn saft_code(&self, rate: u32) -> &'static str {
        self.saft_codes
            .iter()
            .find(|(r, _)| *r == rate)
            .map_or("", |(_, code)| code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Csv,
    Xlsx,
}

/// One business unit of a split pattern, recognized by document-number
/// prefixes or by markers inside the note column.
#[derive(Debug, Clone, Copy)]
pub struct SplitUnit {
    pub id: &'static str,
    pub doc_prefixes: &'static [&'static str],
    pub note_markers: &'static [&'static str],
}

/// Business-unit partitioning rule for split (M1/M2) patterns.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    pub units: &'static [SplitUnit],
    pub default_unit: &'static str,
}

impl SplitConfig {
    /// Resolve the unit for one document; unrecognized documents fall back
    /// to the default unit, matching the reference behavior.
    pub fn unit_for(&self, document_number: &str, note: &str) -> &'static str {
        for unit in self.units {
            if unit.doc_prefixes.iter().any(|p| document_number.starts_with(p)) {
                return unit.id;
            }
            if unit.note_markers.iter().any(|m| note.contains(m)) {
                return unit.id;
            }
        }
        self.default_unit
    }
}

/// A named transformation pattern: how to recognize one input file family
/// and how to turn its rows into the fixed import schema.
///
/// Patterns are data. Nothing outside the declared rules (filename tokens,
/// header inspection as tie-breaker) may select a pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: &'static str,
    pub family: PatternFamily,
    /// Lowercase substrings matched against the lowercased filename; the
    /// longest matching token wins, so more specific names take precedence.
    pub filename_tokens: &'static [&'static str],
    pub columns: SourceColumns,
    /// Date formats tried in order; no auto-detection beyond this list.
    pub date_formats: &'static [&'static str],
    pub number_style: NumberStyle,
    /// Payment bucket to output column. Only meaningful for CardCec.
    pub payment_map: &'static [(PaymentType, &'static str)],
    pub vat: VatConfig,
    pub output: OutputProfile,
    pub schema: &'static OutputSchema,
    pub split: Option<SplitConfig>,
}

impl Pattern {
    /// Longest filename token contained in `filename_lower`, if any.
    pub fn match_strength(&self, filename_lower: &str) -> Option<usize> {
        self.filename_tokens
            .iter()
            .filter(|t| filename_lower.contains(*t))
            .map(|t| t.len())
            .max()
    }

    pub fn payment_columns(&self) -> Result<&PaymentColumns> {
        match &self.columns {
            SourceColumns::Payments(c) => Ok(c),
            SourceColumns::Borderou(_) => Err(ConvError::InvalidPattern {
                name: self.name.to_string(),
                reason: "pattern does not declare payment columns".to_string(),
            }),
        }
    }

    pub fn borderou_columns(&self) -> Result<&BorderouColumns> {
        match &self.columns {
            SourceColumns::Borderou(c) => Ok(c),
            SourceColumns::Payments(_) => Err(ConvError::InvalidPattern {
                name: self.name.to_string(),
                reason: "pattern does not declare borderou columns".to_string(),
            }),
        }
    }

    /// Validate the declaration; malformed patterns are rejected at
    /// registration instead of failing mid-transform.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| {
            Err(ConvError::InvalidPattern {
                name: self.name.to_string(),
                reason,
            })
        };

        if self.name.trim().is_empty() {
            return fail("name must not be empty".to_string());
        }
        if self.filename_tokens.is_empty() {
            return fail("at least one filename token is required".to_string());
        }
        for token in self.filename_tokens {
            if token.trim().is_empty() {
                return fail("filename tokens must not be empty".to_string());
            }
            if *token != token.to_lowercase() {
                return fail(format!("filename token '{token}' must be lowercase"));
            }
        }
        if self.vat.rates.is_empty() {
            return fail("at least one VAT rate is required".to_string());
        }
        if self.date_formats.is_empty() {
            return fail("at least one date format is required".to_string());
        }
        if matches!(self.family, PatternFamily::CardCec) && self.payment_map.is_empty() {
            return fail("CardCec patterns require a payment mapping".to_string());
        }
        for (_, column) in self.payment_map {
            if !self.schema.columns.iter().any(|c| c.name == *column) {
                return fail(format!(
                    "payment bucket column '{column}' is not in schema '{}'",
                    self.schema.name
                ));
            }
        }
        if self.output.output_name.trim().is_empty() {
            return fail("output name must not be empty".to_string());
        }
        if let Some(split) = &self.split {
            if split.units.is_empty() {
                return fail("split config requires at least one unit".to_string());
            }
            if !split.units.iter().any(|u| u.id == split.default_unit) {
                return fail(format!(
                    "split default unit '{}' is not among the declared units",
                    split.default_unit
                ));
            }
            if !self.output.output_name.contains("{unit}") {
                return fail("split patterns require a '{unit}' placeholder in the output name"
                    .to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    #[test]
    fn match_strength_prefers_longest_token() {
        let pattern = builtin::fast_food_1();
        let strength = pattern
            .match_strength("pos__centralizator_incasari fast-food 1.csv")
            .unwrap();
        assert_eq!(strength, "fast-food 1".len());
        assert!(pattern.match_strength("restaurant.csv").is_none());
    }

    #[test]
    fn split_unit_resolution_checks_prefix_then_note() {
        let split = builtin::borderou_m1().split.unwrap();
        assert_eq!(split.unit_for("15023", ""), "0014");
        assert_eq!(split.unit_for("6001", ""), "0012");
        assert_eq!(split.unit_for("9999", "casa nr.12"), "0012");
        // Unrecognized documents fall back to the default unit.
        assert_eq!(split.unit_for("9999", ""), "0014");
    }

    #[test]
    fn builtin_patterns_validate() {
        for pattern in builtin::all() {
            pattern.validate().expect("builtin pattern must be valid");
        }
    }

    #[test]
    fn uppercase_token_is_rejected() {
        let mut pattern = builtin::fast_food_1();
        pattern.filename_tokens = &["FF1"];
        assert!(pattern.validate().is_err());
    }
}
