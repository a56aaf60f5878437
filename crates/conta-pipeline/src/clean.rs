//! Borderou cleaning stage: turn the loosely structured register export
//! into the fixed 19-column cleaned artifact.
//!
//! The register export carries banner rows above the data, a repeated
//! header block, and totals rows at the bottom. The financial columns
//! drift between export versions, so their positions are detected from
//! the data itself and cross-checked against the expected VAT rates.

use conta_ingest::parse::{parse_datetime, parse_decimal, parse_integer};
use conta_model::{OutputTable, RawTable, Result, RowBuilder};
use conta_patterns::{NumberStyle, schemas::CLEANED_SCHEMA};
use conta_transform::format_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, error, info, warn};

// The cleaned artifact and the raw register export both use dot decimals.
const STYLE: NumberStyle = NumberStyle::DotDecimal;

/// Marker in the second column of every real data row.
const DATA_MARKER: &str = "Z POS";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
];

/// Detected positions of the financial columns.
#[derive(Debug, Default, Clone, Copy)]
struct ColumnLayout {
    total: Option<usize>,
    vat21_base: Option<usize>,
    vat21_value: Option<usize>,
    vat11_base: Option<usize>,
    vat11_value: Option<usize>,
    non_taxable_base: Option<usize>,
    non_taxable_value: Option<usize>,
}

fn cell_decimal(table: &RawTable, row: usize, col: usize) -> Option<Decimal> {
    parse_decimal(table.cell(row, col), STYLE)
}

/// First row whose first column is numeric and whose second column carries
/// the register marker. Banner and repeated header rows never satisfy both.
fn detect_data_start(table: &RawTable) -> usize {
    for row in 0..table.rows.len() {
        let first = table.cell(row, 0).trim();
        let second = table.cell(row, 1);
        if !first.is_empty() && parse_decimal(first, STYLE).is_some() && second.contains(DATA_MARKER)
        {
            debug!(row, "detected data start");
            return row;
        }
    }
    warn!("no data start marker found, assuming data begins at the first row");
    0
}

/// Locate the financial columns from the first data row: the total is the
/// first positive numeric cell after the note column, each rate is a
/// (base, value) pair where value is near base * rate, and the non-taxable
/// pair is the last numeric pair from the right.
fn detect_layout(table: &RawTable, start: usize) -> ColumnLayout {
    let mut layout = ColumnLayout::default();
    let width = table.headers.len().max(
        table
            .rows
            .get(start)
            .map(Vec::len)
            .unwrap_or_default(),
    );

    for col in 5..width {
        if let Some(value) = cell_decimal(table, start, col) {
            if value > Decimal::ZERO {
                layout.total = Some(col);
                break;
            }
        }
    }

    if let Some(total) = layout.total {
        let pair = find_rate_pair(table, start, total + 1, width, dec!(0.21));
        if let Some((base, value)) = pair {
            layout.vat21_base = Some(base);
            layout.vat21_value = Some(value);
            if let Some((base11, value11)) =
                find_rate_pair(table, start, value + 1, width, dec!(0.11))
            {
                layout.vat11_base = Some(base11);
                layout.vat11_value = Some(value11);
            }
        }
    }

    // Non-taxable pair: last adjacent numeric pair, scanned from the right.
    let floor = layout.vat11_value.unwrap_or(0).max(5);
    if width >= 2 {
        for col in (floor + 1..=width - 2).rev() {
            if cell_decimal(table, start, col).is_some()
                && cell_decimal(table, start, col + 1).is_some()
            {
                layout.non_taxable_base = Some(col);
                layout.non_taxable_value = Some(col + 1);
                break;
            }
        }
    }

    debug!(?layout, "detected column layout");
    layout
}

fn find_rate_pair(
    table: &RawTable,
    row: usize,
    from: usize,
    width: usize,
    rate: Decimal,
) -> Option<(usize, usize)> {
    for col in from..width.saturating_sub(1) {
        let (Some(base), Some(value)) = (
            cell_decimal(table, row, col),
            cell_decimal(table, row, col + 1),
        ) else {
            continue;
        };
        if base > Decimal::ZERO && value > Decimal::ZERO && (value - base * rate).abs() < base * dec!(0.05)
        {
            return Some((col, col + 1));
        }
    }
    None
}

/// Cross-check a detected (base, value) pair against up to ten data rows.
/// At least 70% of the usable rows must show the expected rate within a
/// two-percentage-point tolerance; fewer than three usable rows defers to
/// the detection heuristic.
fn validate_rate_pair(
    table: &RawTable,
    start: usize,
    base_col: Option<usize>,
    value_col: Option<usize>,
    rate: Decimal,
    label: &str,
) -> bool {
    let (Some(base_col), Some(value_col)) = (base_col, value_col) else {
        return true;
    };

    let mut valid = 0usize;
    let mut checked = 0usize;
    for row in start..table.rows.len().min(start + 10) {
        let (Some(base), Some(value)) = (
            cell_decimal(table, row, base_col),
            cell_decimal(table, row, value_col),
        ) else {
            continue;
        };
        if base.is_zero() {
            continue;
        }
        checked += 1;
        if (value / base - rate).abs() < dec!(0.02) {
            valid += 1;
        }
    }

    if checked == 0 {
        warn!(label, "rate validation skipped, no usable numeric rows");
        return true;
    }
    if checked < 3 {
        warn!(label, checked, "too few rows for reliable rate validation");
        return true;
    }
    if valid * 10 < checked * 7 {
        error!(
            label,
            valid,
            checked,
            column = value_col,
            "rate validation failed, detected column is likely wrong"
        );
        return false;
    }
    info!(label, valid, checked, "rate column validated");
    true
}

fn money_cell(table: &RawTable, row: usize, col: Option<usize>) -> String {
    col.and_then(|c| cell_decimal(table, row, c))
        .map_or_else(|| "0.00".to_string(), format_money)
}

/// Clean one raw register table into the standardized artifact.
///
/// Rows whose document number or date do not parse are the banner, header
/// and totals rows; they are dropped, not errors.
pub fn clean_borderou(table: &RawTable) -> Result<OutputTable> {
    let start = detect_data_start(table);
    let layout = detect_layout(table, start);

    let valid_21 = validate_rate_pair(
        table,
        start,
        layout.vat21_base,
        layout.vat21_value,
        dec!(0.21),
        "21% pair",
    );
    let valid_11 = validate_rate_pair(
        table,
        start,
        layout.vat11_base,
        layout.vat11_value,
        dec!(0.11),
        "11% pair",
    );
    if !valid_21 || !valid_11 {
        error!(
            source = table.source_name.as_str(),
            "column detection validation failed, review the input file format"
        );
    }

    let mut cleaned = OutputTable::new(&CLEANED_SCHEMA);
    let mut dropped = 0usize;

    for row in start..table.rows.len() {
        if table.row_is_blank(row) {
            continue;
        }
        let Some(document_number) = parse_integer(table.cell(row, 2)) else {
            dropped += 1;
            continue;
        };
        let Some(date) = parse_datetime(table.cell(row, 3), DATE_FORMATS) else {
            dropped += 1;
            continue;
        };

        let built = RowBuilder::new(&CLEANED_SCHEMA)
            .set(
                "Nr_Crt",
                parse_integer(table.cell(row, 0)).map_or_else(String::new, |v| v.to_string()),
            )
            .set("Denumire", table.cell(row, 1).trim())
            .set("Nr_Doc_Z", document_number.to_string())
            .set("Data", date.date().format("%Y-%m-%d").to_string())
            .set("Explicatii", table.cell(row, 4).trim())
            .set("Total_Valoare", money_cell(table, row, layout.total))
            .set("Scutit_Cu_Drept_Reducere", "0.00")
            .set("Scutit_Fara_Drept_Reducere", "0.00")
            .set(
                "Taxabile_21_Baza_Impozitare",
                money_cell(table, row, layout.vat21_base),
            )
            .set(
                "Taxabile_21_Val_TVA",
                money_cell(table, row, layout.vat21_value),
            )
            .set(
                "Taxabile_11_Baza_Impozitare",
                money_cell(table, row, layout.vat11_base),
            )
            .set(
                "Taxabile_11_Val_TVA",
                money_cell(table, row, layout.vat11_value),
            )
            .set("Nefolosit_1_Baza_Impozitare", "0.00")
            .set("Nefolosit_1_Val_TVA", "0.00")
            .set("Nefolosit_2_Baza_Impozitare", "0.00")
            .set("Nefolosit_2_Val_TVA", "0.00")
            .set(
                "Netaxabil_Baza_Impozitare",
                money_cell(table, row, layout.non_taxable_base),
            )
            .set(
                "Netaxabil_Val_TVA",
                money_cell(table, row, layout.non_taxable_value),
            )
            .set("Final_Rate", "0.00")
            .build();
        cleaned.push_row(built)?;
    }

    info!(
        source = table.source_name.as_str(),
        rows = cleaned.len(),
        dropped,
        "cleaned borderou table"
    );
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape of the register export: banner rows, a repeated header block,
    // data rows with the register marker, then a totals footer.
    fn register_table() -> RawTable {
        let mut table = RawTable::new(
            "Borderou M3.csv",
            (0..12).map(|i| format!("Unnamed: {i}")).collect(),
        );
        let rows: Vec<Vec<&str>> = vec![
            vec!["", "BORDEROU VANZARI", "", "", "", "", "", "", "", "", "", ""],
            vec![
                "Nr", "Denumire", "Doc", "Data", "Explicatii", "Total", "B21", "T21", "B11",
                "T11", "NB", "NT",
            ],
            vec![
                "1", "Z POS 1", "101", "2025-02-01", "bon zilnic", "200.00", "100.00", "21.00",
                "53.15", "5.85", "20.00", "0.00",
            ],
            vec![
                "2", "Z POS 1", "102", "2025-02-02", "bon zilnic", "242.00", "180.00", "37.80",
                "21.80", "2.40", "0.00", "0.00",
            ],
            vec![
                "3", "Z POS 1", "103", "2025-02-03", "bon zilnic", "121.00", "100.00", "21.00",
                "0.00", "0.00", "0.00", "0.00",
            ],
            vec![
                "", "TOTAL", "", "", "", "563.00", "380.00", "79.80", "74.95", "8.25", "20.00",
                "0.00",
            ],
        ];
        table.rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        table
    }

    #[test]
    fn data_start_skips_banner_and_header_rows() {
        assert_eq!(detect_data_start(&register_table()), 2);
    }

    #[test]
    fn layout_detection_finds_total_and_rate_pairs() {
        let table = register_table();
        let layout = detect_layout(&table, 2);
        assert_eq!(layout.total, Some(5));
        assert_eq!(layout.vat21_base, Some(6));
        assert_eq!(layout.vat21_value, Some(7));
        assert_eq!(layout.vat11_base, Some(8));
        assert_eq!(layout.vat11_value, Some(9));
        assert_eq!(layout.non_taxable_base, Some(10));
        assert_eq!(layout.non_taxable_value, Some(11));
    }

    #[test]
    fn totals_footer_is_dropped_from_the_cleaned_artifact() {
        let cleaned = clean_borderou(&register_table()).unwrap();
        assert_eq!(cleaned.len(), 3);

        let idx = |name: &str| {
            CLEANED_SCHEMA
                .columns
                .iter()
                .position(|c| c.name == name)
                .unwrap()
        };
        assert_eq!(cleaned.rows[0][idx("Nr_Doc_Z")], "101");
        assert_eq!(cleaned.rows[0][idx("Data")], "2025-02-01");
        assert_eq!(cleaned.rows[0][idx("Total_Valoare")], "200.00");
        assert_eq!(cleaned.rows[0][idx("Netaxabil_Baza_Impozitare")], "20.00");
        assert_eq!(cleaned.rows[2][idx("Taxabile_11_Baza_Impozitare")], "0.00");
    }

    #[test]
    fn misdetected_rate_pair_fails_validation() {
        let table = register_table();
        // Treating the 11% base column as the 21% value column must fail.
        assert!(!validate_rate_pair(
            &table,
            2,
            Some(6),
            Some(8),
            dec!(0.21),
            "21% pair"
        ));
    }
}
