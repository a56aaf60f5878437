//! Input Normalizer: raw table + matched pattern -> typed canonical records.
//!
//! The normalizer verifies the pattern's declared columns against the
//! header row up front, then parses each cell against its declared type.
//! Two documented tolerances: fully blank rows are skipped (trailing blank
//! rows are common in exported spreadsheets), and payment rows without a
//! transaction id are skipped (subtotal lines in some POS exports).
//! Everything else fails fast with the exact row/column location.

use conta_model::{BorderouRecord, CanonicalRecord, ConvError, PaymentType, RawTable, Result};
use conta_patterns::Pattern;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::parse::{parse_datetime, parse_decimal, parse_integer};

/// Verify that every named column exists; all missing names are collected
/// into a single `SchemaMismatch` so the user sees the full list at once.
pub fn verify_columns(table: &RawTable, names: &[&'static str]) -> Result<()> {
    let missing: Vec<String> = names
        .iter()
        .filter(|n| table.column_index(n).is_none())
        .map(|n| (*n).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConvError::SchemaMismatch { missing })
    }
}

fn value_parse(row: usize, column: &str, value: &str, expected: &'static str) -> ConvError {
    ConvError::ValueParse {
        row,
        column: column.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Normalize a POS payment export into canonical records.
pub fn normalize_payments(table: &RawTable, pattern: &Pattern) -> Result<Vec<CanonicalRecord>> {
    let columns = pattern.payment_columns()?;
    verify_columns(table, &columns.all())?;

    let id_idx = table.column_index(columns.transaction_id).expect("verified");
    let date_idx = table.column_index(columns.date).expect("verified");
    let type_idx = table.column_index(columns.payment_type).expect("verified");
    let amount_idx = table.column_index(columns.amount).expect("verified");

    let mut records = Vec::new();
    for row in 0..table.rows.len() {
        if table.row_is_blank(row) {
            trace!(row = row + 1, "skipping blank row");
            continue;
        }
        let row_no = row + 1;

        let id_raw = table.cell(row, id_idx);
        if id_raw.trim().is_empty() {
            // Subtotal/footer line without a Z number; documented skip.
            trace!(row = row_no, "skipping row without transaction id");
            continue;
        }
        let transaction_id = parse_integer(id_raw)
            .ok_or_else(|| value_parse(row_no, columns.transaction_id, id_raw, "transaction id"))?;

        let date_raw = table.cell(row, date_idx);
        let timestamp = parse_datetime(date_raw, pattern.date_formats)
            .ok_or_else(|| value_parse(row_no, columns.date, date_raw, "date"))?;

        let type_raw = table.cell(row, type_idx);
        let payment_type = PaymentType::parse(type_raw)
            .ok_or_else(|| value_parse(row_no, columns.payment_type, type_raw, "payment type"))?;

        let amount_raw = table.cell(row, amount_idx);
        let amount = parse_decimal(amount_raw, pattern.number_style)
            .ok_or_else(|| value_parse(row_no, columns.amount, amount_raw, "decimal amount"))?;

        records.push(CanonicalRecord {
            transaction_id,
            timestamp,
            payment_type,
            amount,
        });
    }

    debug!(
        source = table.source_name.as_str(),
        pattern = pattern.name,
        records = records.len(),
        "normalized payment export"
    );
    Ok(records)
}

/// Normalize the cleaned Borderou artifact into typed records.
pub fn normalize_borderou(table: &RawTable, pattern: &Pattern) -> Result<Vec<BorderouRecord>> {
    let columns = pattern.borderou_columns()?;
    verify_columns(table, &columns.all())?;

    let doc_idx = table.column_index(columns.document_number).expect("verified");
    let date_idx = table.column_index(columns.date).expect("verified");
    let note_idx = table.column_index(columns.note).expect("verified");
    let money_columns = [
        columns.total_value,
        columns.non_taxable_base,
        columns.vat21_base,
        columns.vat21_value,
        columns.vat11_base,
        columns.vat11_value,
    ];
    let money_idx: Vec<usize> = money_columns
        .iter()
        .map(|c| table.column_index(c).expect("verified"))
        .collect();

    let mut records = Vec::new();
    for row in 0..table.rows.len() {
        if table.row_is_blank(row) {
            trace!(row = row + 1, "skipping blank row");
            continue;
        }
        let row_no = row + 1;

        let doc_raw = table.cell(row, doc_idx);
        let document_number = parse_integer(doc_raw)
            .ok_or_else(|| value_parse(row_no, columns.document_number, doc_raw, "document number"))?;

        let date_raw = table.cell(row, date_idx);
        let date = parse_datetime(date_raw, pattern.date_formats)
            .ok_or_else(|| value_parse(row_no, columns.date, date_raw, "date"))?
            .date();

        let mut amounts = [Decimal::ZERO; 6];
        for (slot, (&idx, column)) in money_idx.iter().zip(money_columns.iter()).enumerate() {
            let raw = table.cell(row, idx);
            amounts[slot] = parse_decimal(raw, pattern.number_style)
                .ok_or_else(|| value_parse(row_no, column, raw, "decimal amount"))?;
        }

        records.push(BorderouRecord {
            document_number,
            date,
            note: table.cell(row, note_idx).trim().to_string(),
            total_value: amounts[0],
            non_taxable_base: amounts[1],
            vat21_base: amounts[2],
            vat21_value: amounts[3],
            vat11_base: amounts[4],
            vat11_value: amounts[5],
        });
    }

    debug!(
        source = table.source_name.as_str(),
        pattern = pattern.name,
        records = records.len(),
        "normalized borderou artifact"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use conta_patterns::builtin;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::read::read_csv_bytes;

    const POS_CSV: &[u8] = b"Nr. Z,Data Ultimei Incasari,Tip Incasare,Valoare\n\
1,2025-01-10 10:00:00,CARD,121.00\n\
2,2025-01-10 10:05:00,CEC,55.00\n\
,,,\n";

    #[test]
    fn record_count_matches_non_blank_rows() {
        let table = read_csv_bytes("POS FAST-FOOD 1.csv", POS_CSV).unwrap();
        let records = normalize_payments(&table, &builtin::fast_food_1()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transaction_id, 1);
        assert_eq!(records[0].payment_type, PaymentType::Card);
        assert_eq!(records[0].amount, dec!(121.00));
        assert_eq!(records[1].date_key(), "20250110");
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let table = read_csv_bytes("t.csv", b"Nr. Z,Tip Incasare\n1,CARD\n").unwrap();
        let err = normalize_payments(&table, &builtin::fast_food_1()).unwrap_err();
        match err {
            ConvError::SchemaMismatch { missing } => {
                assert_eq!(missing, vec!["Data Ultimei Incasari", "Valoare"]);
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }

    #[test]
    fn bad_amount_reports_row_and_column() {
        let csv = b"Nr. Z,Data Ultimei Incasari,Tip Incasare,Valoare\n\
1,2025-01-10 10:00:00,CARD,oops\n";
        let table = read_csv_bytes("t.csv", csv).unwrap();
        let err = normalize_payments(&table, &builtin::fast_food_1()).unwrap_err();
        match err {
            ConvError::ValueParse { row, column, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Valoare");
                assert_eq!(value, "oops");
            }
            other => panic!("expected ValueParse, got {other}"),
        }
    }

    #[test]
    fn unknown_payment_type_is_not_coerced() {
        let csv = b"Nr. Z,Data Ultimei Incasari,Tip Incasare,Valoare\n\
1,2025-01-10 10:00:00,BITCOIN,10.00\n";
        let table = read_csv_bytes("t.csv", csv).unwrap();
        assert!(matches!(
            normalize_payments(&table, &builtin::fast_food_1()),
            Err(ConvError::ValueParse { .. })
        ));
    }

    #[test]
    fn borderou_rows_normalize_with_note() {
        let csv = b"Nr_Crt,Denumire,Nr_Doc_Z,Data,Explicatii,Total_Valoare,Scutit_Cu_Drept_Reducere,Scutit_Fara_Drept_Reducere,Taxabile_21_Baza_Impozitare,Taxabile_21_Val_TVA,Taxabile_11_Baza_Impozitare,Taxabile_11_Val_TVA,Nefolosit_1_Baza_Impozitare,Nefolosit_1_Val_TVA,Nefolosit_2_Baza_Impozitare,Nefolosit_2_Val_TVA,Netaxabil_Baza_Impozitare,Netaxabil_Val_TVA,Final_Rate\n\
1,Z POS 15,15023,2025-03-02,bon nr.14,1000.00,0.00,0.00,600.00,126.00,156.76,17.24,0.00,0.00,0.00,0.00,100.00,0.00,0.00\n";
        let table = read_csv_bytes("m1_cleaned.csv", csv).unwrap();
        let records = normalize_borderou(&table, &builtin::borderou_m1()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document_number, 15023);
        assert_eq!(records[0].note, "bon nr.14");
        assert_eq!(records[0].taxable_total(), dec!(900.00));
    }
}
