//! Built-in pattern set.
//!
//! Three POS payment exports (CardCec family) and three Borderou variants.
//! New file families are added here as one more constructor plus a line in
//! [`all`]; nothing else in the converter changes.

use conta_model::PaymentType;

use crate::pattern::{
    BorderouColumns, NumberStyle, OutputProfile, Pattern, PatternFamily, PaymentColumns,
    SourceColumns, SplitConfig, SplitUnit, TargetFormat, VatConfig, VatMethod,
};
use crate::schemas::IMPORT_SCHEMA;

/// Standard VAT rate set: 21% rows first, then 11% rows.
pub const VAT_RATES: &[u32] = &[21, 11];

const POS_COLUMNS: PaymentColumns = PaymentColumns {
    transaction_id: "Nr. Z",
    date: "Data Ultimei Incasari",
    payment_type: "Tip Incasare",
    amount: "Valoare",
};

const POS_DATE_FORMATS: &[&str] = &[
    "%d-%b-%y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Payment bucket columns in the import schema.
const POS_PAYMENT_MAP: &[(PaymentType, &str)] = &[
    (PaymentType::Card, "Card"),
    (PaymentType::Cec, "Cont casa"),
    (PaymentType::Numerar, "Numerar"),
    (PaymentType::Tichete, "Tichete"),
];

/// SAF-T VAT codes are entered manually for the POS imports.
const POS_SAFT_CODES: &[(u32, &str)] = &[(21, ""), (11, "")];

/// SAF-T VAT codes used by the Borderou import files.
const BORDEROU_SAFT_CODES: &[(u32, &str)] = &[(21, "310344"), (11, "310351")];

const BORDEROU_COLUMNS: BorderouColumns = BorderouColumns {
    document_number: "Nr_Doc_Z",
    date: "Data",
    note: "Explicatii",
    total_value: "Total_Valoare",
    non_taxable_base: "Netaxabil_Baza_Impozitare",
    vat21_base: "Taxabile_21_Baza_Impozitare",
    vat21_value: "Taxabile_21_Val_TVA",
    vat11_base: "Taxabile_11_Baza_Impozitare",
    vat11_value: "Taxabile_11_Val_TVA",
};

/// The cleaned artifact writes ISO dates.
const BORDEROU_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

pub fn fast_food_1() -> Pattern {
    Pattern {
        name: "FAST-FOOD 1",
        family: PatternFamily::CardCec,
        filename_tokens: &["fast-food 1", "fast food 1", "fast_food_1", "fastfood1", "ff1"],
        columns: SourceColumns::Payments(POS_COLUMNS),
        date_formats: POS_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: POS_PAYMENT_MAP,
        vat: VatConfig {
            method: VatMethod::Standard,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "F",
            denumire: "ff 1",
            cod_depozit: "3",
            saft_codes: POS_SAFT_CODES,
            output_name: "import bon fiscal vanzare FAST FOOD 1.csv",
            format: TargetFormat::Csv,
        },
        schema: &IMPORT_SCHEMA,
        split: None,
    }
}

pub fn fast_food_2() -> Pattern {
    Pattern {
        name: "FAST FOOD 2",
        family: PatternFamily::CardCec,
        filename_tokens: &["fast food 2", "fast-food 2", "fast_food_2", "fastfood2", "ff2"],
        columns: SourceColumns::Payments(POS_COLUMNS),
        date_formats: POS_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: POS_PAYMENT_MAP,
        vat: VatConfig {
            method: VatMethod::Standard,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "F 2",
            denumire: "ff 2",
            cod_depozit: "4",
            saft_codes: POS_SAFT_CODES,
            output_name: "import bon fiscal vanzare FAST FOOD 2.csv",
            format: TargetFormat::Csv,
        },
        schema: &IMPORT_SCHEMA,
        split: None,
    }
}

pub fn autoservire() -> Pattern {
    Pattern {
        name: "AUTOSERVIRE AMT COMPLEX",
        family: PatternFamily::CardCec,
        filename_tokens: &["autoservire amt", "amt complex", "amt_complex", "autoservire"],
        columns: SourceColumns::Payments(POS_COLUMNS),
        date_formats: POS_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: POS_PAYMENT_MAP,
        vat: VatConfig {
            // Reconciled against the reference export rather than recomputed.
            method: VatMethod::ReverseFromSample,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "A",
            denumire: "autoservire",
            cod_depozit: "1",
            saft_codes: POS_SAFT_CODES,
            output_name: "import bon fiscal vanzare AUTOSERVIRE.csv",
            format: TargetFormat::Csv,
        },
        schema: &IMPORT_SCHEMA,
        split: None,
    }
}

pub fn borderou_m1() -> Pattern {
    Pattern {
        name: "BORDEROU M1",
        family: PatternFamily::Borderou,
        filename_tokens: &["casa 0014", "casa 0012", "m1"],
        columns: SourceColumns::Borderou(BORDEROU_COLUMNS),
        date_formats: BORDEROU_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: &[],
        vat: VatConfig {
            method: VatMethod::Standard,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "BFM1",
            denumire: "marfa m1 ",
            cod_depozit: "1",
            saft_codes: BORDEROU_SAFT_CODES,
            output_name: "M1 import bon fiscal vanzare CASA {unit}.xlsx",
            format: TargetFormat::Xlsx,
        },
        schema: &IMPORT_SCHEMA,
        split: Some(SplitConfig {
            units: &[
                SplitUnit {
                    id: "0014",
                    doc_prefixes: &["15"],
                    note_markers: &["nr.14"],
                },
                SplitUnit {
                    id: "0012",
                    doc_prefixes: &["6"],
                    note_markers: &["nr.12"],
                },
            ],
            default_unit: "0014",
        }),
    }
}

pub fn borderou_m2() -> Pattern {
    Pattern {
        name: "BORDEROU M2",
        family: PatternFamily::Borderou,
        filename_tokens: &["m2"],
        columns: SourceColumns::Borderou(BORDEROU_COLUMNS),
        date_formats: BORDEROU_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: &[],
        vat: VatConfig {
            method: VatMethod::Standard,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "BFM2",
            denumire: "marfa m2 ",
            cod_depozit: "2",
            saft_codes: BORDEROU_SAFT_CODES,
            output_name: "M2 import bon fiscal vanzare CASA {unit}.xlsx",
            format: TargetFormat::Xlsx,
        },
        schema: &IMPORT_SCHEMA,
        split: Some(SplitConfig {
            units: &[
                SplitUnit {
                    id: "102",
                    doc_prefixes: &["102"],
                    note_markers: &["102"],
                },
                SplitUnit {
                    id: "103",
                    doc_prefixes: &["103"],
                    note_markers: &["103"],
                },
            ],
            default_unit: "102",
        }),
    }
}

pub fn borderou_m3() -> Pattern {
    Pattern {
        name: "BORDEROU M3",
        family: PatternFamily::Borderou,
        filename_tokens: &["m3"],
        columns: SourceColumns::Borderou(BORDEROU_COLUMNS),
        date_formats: BORDEROU_DATE_FORMATS,
        number_style: NumberStyle::DotDecimal,
        payment_map: &[],
        vat: VatConfig {
            method: VatMethod::Standard,
            rates: VAT_RATES,
        },
        output: OutputProfile {
            serie: "BFM3",
            denumire: "marfa m3 ",
            cod_depozit: "3",
            saft_codes: BORDEROU_SAFT_CODES,
            output_name: "import bon fiscal vanzare M3.xlsx",
            format: TargetFormat::Xlsx,
        },
        schema: &IMPORT_SCHEMA,
        split: None,
    }
}

/// Every built-in pattern, in registration order.
pub fn all() -> Vec<Pattern> {
    vec![
        fast_food_1(),
        fast_food_2(),
        autoservire(),
        borderou_m1(),
        borderou_m2(),
        borderou_m3(),
    ]
}
