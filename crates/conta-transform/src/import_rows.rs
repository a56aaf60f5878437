//! Row generation for the fixed "import bon fiscal" schema.

use conta_model::{BorderouRecord, OutputTable, Result, RowBuilder};
use conta_patterns::Pattern;
use tracing::debug;

use crate::group::TransactionGroup;
use crate::money::format_money;
use crate::vat::{allocate_rates, standard_split};

/// Build the import table for grouped POS payment documents.
///
/// One row is emitted per document per configured VAT rate, in document
/// order then rate order. Payment buckets land in the columns the pattern
/// maps them to; the remaining account and article cells are fixed values
/// required by the downstream ledger import.
pub fn cardcec_rows(groups: &[TransactionGroup], pattern: &Pattern) -> Result<OutputTable> {
    let mut table = OutputTable::new(pattern.schema);

    for group in groups {
        let date = group.date_key();
        let total = format_money(group.total());
        let portions = allocate_rates(group, &pattern.vat)?;

        for portion in portions {
            let split = standard_split(portion.gross, portion.rate);
            let gross = format_money(split.base + split.vat);

            let mut row = RowBuilder::new(pattern.schema)
                .set("Serie document", pattern.output.serie)
                .set("Numar document", group.document_number.to_string())
                .set("Cod depozit", pattern.output.cod_depozit)
                .set("Data document", date.as_str())
                .set("Data scadenta", date.as_str())
                .set("Cod tip factura SAF-T", "380")
                .set("Valoare neta totala", format_money(split.base))
                .set("Valoare TVA", format_money(split.vat))
                .set("Total document", total.as_str())
                .set("Cont banca", "5125")
                .set("Cont tichete", "0")
                .set("Cont TVA", "5328")
                .set("Cod articol", "4427")
                .set(
                    "Denumire articol",
                    format!("{} {}%", pattern.output.denumire, portion.rate),
                )
                .set("Cantitate", "1")
                .set("Cont serviciu", "5311")
                .set("Pret cu TVA", gross.as_str())
                .set("Total fara TVA", format_money(split.base))
                .set("Total TVA", format_money(split.vat))
                .set("Total cu TVA", gross.as_str())
                .set("Optiune TVA", "Taxabile")
                .set("Cota TVA", portion.rate.to_string())
                .set("Cod TVA SAF-T", pattern.output.saft_code(portion.rate));

            for (payment_type, column) in pattern.payment_map {
                row = row.set(column, format_money(group.bucket(*payment_type).abs()));
            }

            table.push_row(row.build())?;
        }
    }

    debug!(
        groups = groups.len(),
        rows = table.len(),
        pattern = pattern.name,
        "built payment import rows"
    );
    Ok(table)
}

/// Build the import table for cleaned Borderou documents.
///
/// The downstream import wants the rows batched by rate: every document's
/// 21% row first, then every document's 11% row. Both rows are emitted even
/// when a rate's base is zero. `serie_override` replaces the pattern's
/// series for split outputs.
pub fn borderou_rows(
    records: &[BorderouRecord],
    pattern: &Pattern,
    serie_override: Option<&str>,
) -> Result<OutputTable> {
    let mut table = OutputTable::new(pattern.schema);
    let serie = serie_override.unwrap_or(pattern.output.serie);

    let mut batches: Vec<Vec<Vec<String>>> = vec![Vec::new(); pattern.vat.rates.len()];
    for record in records {
        let date = record.date_key();
        let taxable = format_money(record.taxable_total());

        for (slot, &rate) in pattern.vat.rates.iter().enumerate() {
            let (base, vat) = match rate {
                21 => (record.vat21_base, record.vat21_value),
                _ => (record.vat11_base, record.vat11_value),
            };
            let gross = format_money(base + vat);

            let row = RowBuilder::new(pattern.schema)
                .set("Serie document", serie)
                .set("Numar document", record.document_number.to_string())
                .set("Cod depozit", pattern.output.cod_depozit)
                .set("Data document", date.as_str())
                .set("Data scadenta", date.as_str())
                .set("Cod tip factura SAF-T", "380")
                .set("Valoare neta totala", format_money(base))
                .set("Valoare TVA", format_money(vat))
                .set("Total document", taxable.as_str())
                .set("Card", "0")
                .set("Cont banca", "5125")
                .set("Numerar", taxable.as_str())
                .set("Cont casa", "5311")
                .set("Tichete", "0")
                .set("Cont tichete", "5328")
                .set("Cont TVA", "4427")
                .set("Cod articol", format!("{} {}%", pattern.output.denumire, rate))
                .set("Denumire articol", pattern.output.denumire)
                .set("Cantitate", "1")
                .set("Pret cu TVA", gross.as_str())
                .set("Total fara TVA", format_money(base))
                .set("Total TVA", format_money(vat))
                .set("Total cu TVA", gross.as_str())
                .set("Optiune TVA", "Taxabile")
                .set("Cota TVA", rate.to_string())
                .set("Cod TVA SAF-T", pattern.output.saft_code(rate))
                .build();
            batches[slot].push(row);
        }
    }

    for batch in batches {
        for row in batch {
            table.push_row(row)?;
        }
    }

    debug!(
        records = records.len(),
        rows = table.len(),
        pattern = pattern.name,
        "built borderou import rows"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use conta_model::{CanonicalRecord, PaymentType};
    use conta_patterns::builtin;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::group::group_by_date;

    fn cell<'a>(table: &'a OutputTable, row: usize, column: &str) -> &'a str {
        let idx = table
            .schema
            .columns
            .iter()
            .position(|c| c.name == column)
            .unwrap();
        &table.rows[row][idx]
    }

    #[test]
    fn card_and_cheque_day_splits_into_two_rate_rows() {
        let records = vec![
            CanonicalRecord {
                transaction_id: 1,
                timestamp: NaiveDate::from_ymd_opt(2025, 1, 15)
                    .unwrap()
                    .and_hms_opt(12, 30, 0)
                    .unwrap(),
                payment_type: PaymentType::Card,
                amount: dec!(121.00),
            },
            CanonicalRecord {
                transaction_id: 2,
                timestamp: NaiveDate::from_ymd_opt(2025, 1, 15)
                    .unwrap()
                    .and_hms_opt(14, 0, 0)
                    .unwrap(),
                payment_type: PaymentType::Cec,
                amount: dec!(55.00),
            },
        ];
        let groups = group_by_date(&records);
        let pattern = builtin::fast_food_1();
        let table = cardcec_rows(&groups, &pattern).unwrap();

        // One document, one row per configured rate.
        assert_eq!(table.len(), 2);
        assert_eq!(cell(&table, 0, "Serie document"), "F");
        assert_eq!(cell(&table, 0, "Numar document"), "1");
        assert_eq!(cell(&table, 0, "Data document"), "20250115");
        assert_eq!(cell(&table, 0, "Card"), "121.00");
        assert_eq!(cell(&table, 0, "Cont casa"), "55.00");
        assert_eq!(cell(&table, 0, "Numerar"), "0.00");
        assert_eq!(cell(&table, 0, "Total document"), "176.00");
        assert_eq!(cell(&table, 0, "Cota TVA"), "21");
        assert_eq!(cell(&table, 0, "Valoare neta totala"), "145.45");
        assert_eq!(cell(&table, 0, "Valoare TVA"), "30.55");
        assert_eq!(cell(&table, 0, "Denumire articol"), "ff 1 21%");
        assert_eq!(cell(&table, 1, "Cota TVA"), "11");
        assert_eq!(cell(&table, 1, "Denumire articol"), "ff 1 11%");
        assert_eq!(cell(&table, 0, "Cont banca"), "5125");
        assert_eq!(cell(&table, 0, "Cod articol"), "4427");
        assert_eq!(cell(&table, 0, "Optiune TVA"), "Taxabile");
    }

    #[test]
    fn borderou_rows_batch_all_primary_rate_rows_first() {
        let records = vec![
            BorderouRecord {
                document_number: 101,
                date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                note: String::new(),
                total_value: dec!(200.00),
                non_taxable_base: dec!(20.00),
                vat21_base: dec!(100.00),
                vat21_value: dec!(21.00),
                vat11_base: dec!(53.15),
                vat11_value: dec!(5.85),
            },
            BorderouRecord {
                document_number: 102,
                date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                note: String::new(),
                total_value: dec!(111.00),
                non_taxable_base: dec!(0.00),
                vat21_base: dec!(0.00),
                vat21_value: dec!(0.00),
                vat11_base: dec!(100.00),
                vat11_value: dec!(11.00),
            },
        ];
        let pattern = builtin::borderou_m3();
        let table = borderou_rows(&records, &pattern, None).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(cell(&table, 0, "Cota TVA"), "21");
        assert_eq!(cell(&table, 1, "Cota TVA"), "21");
        assert_eq!(cell(&table, 2, "Cota TVA"), "11");
        assert_eq!(cell(&table, 3, "Cota TVA"), "11");
        assert_eq!(cell(&table, 0, "Numar document"), "101");
        assert_eq!(cell(&table, 2, "Numar document"), "101");

        // Total and Numerar carry the value net of the non-taxable base.
        assert_eq!(cell(&table, 0, "Total document"), "180.00");
        assert_eq!(cell(&table, 0, "Numerar"), "180.00");
        assert_eq!(cell(&table, 0, "Cod TVA SAF-T"), "310344");
        assert_eq!(cell(&table, 2, "Cod TVA SAF-T"), "310351");

        // Zero-rate rows are still emitted.
        assert_eq!(cell(&table, 1, "Valoare neta totala"), "0.00");
        assert_eq!(cell(&table, 1, "Pret cu TVA"), "0.00");
    }

    #[test]
    fn serie_override_replaces_the_pattern_series() {
        let records = vec![BorderouRecord {
            document_number: 15001,
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            note: "bon nr.14".to_string(),
            total_value: dec!(121.00),
            non_taxable_base: dec!(0.00),
            vat21_base: dec!(100.00),
            vat21_value: dec!(21.00),
            vat11_base: dec!(0.00),
            vat11_value: dec!(0.00),
        }];
        let pattern = builtin::borderou_m1();
        let table = borderou_rows(&records, &pattern, Some("BFM1 0014")).unwrap();
        assert_eq!(cell(&table, 0, "Serie document"), "BFM1 0014");
    }
}
