//! Sales export to invoice-import transform.

use chrono::NaiveDate;
use conta_model::{ConvError, OutputTable, RawTable, Result, RowBuilder};
use conta_patterns::schemas::SALES_SCHEMA;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 12] = [
    "data",
    "nr_iesire",
    "den_tip",
    "denumire",
    "den_gest",
    "cantitate",
    "pret",
    "valoare",
    "tert",
    "cod_fiscal",
    "tva_art",
    "tva",
];

/// Internal transfer partners excluded from the invoice import. The double
/// space in the second marker matches the source system's partner name.
const EXCLUDED_PARTNERS: [&str; 2] = ["CLIENT MARFA", "CLIENT  I.T.P"];

/// Map a raw sales export onto the fixed invoice-import schema.
///
/// Rows whose partner is one of the internal transfer accounts are dropped.
/// Monetary and quantity cells pass through as written; only the date is
/// reshaped to the compact `yyyymmdd` form.
pub fn sales_rows(table: &RawTable) -> Result<OutputTable> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ConvError::SchemaMismatch { missing });
    }

    let col = |name: &str| table.column_index(name).unwrap_or_default();
    let (data, nr_iesire, den_tip, cantitate, valoare, tert, cod_fiscal, tva_art, tva) = (
        col("data"),
        col("nr_iesire"),
        col("den_tip"),
        col("cantitate"),
        col("valoare"),
        col("tert"),
        col("cod_fiscal"),
        col("tva_art"),
        col("tva"),
    );

    let mut output = OutputTable::new(&SALES_SCHEMA);
    let mut skipped = 0usize;

    for row in 0..table.rows.len() {
        if table.row_is_blank(row) {
            continue;
        }
        let partner = table.cell(row, tert).trim();
        let partner_upper = partner.to_uppercase();
        if EXCLUDED_PARTNERS.iter().any(|m| partner_upper.contains(m)) {
            skipped += 1;
            continue;
        }

        let raw_date = table.cell(row, data).trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map(|d| d.format("%Y%m%d").to_string())
            .map_err(|_| ConvError::ValueParse {
                row: row + 1,
                column: "data".to_string(),
                value: raw_date.to_string(),
                expected: "date in YYYY-MM-DD form",
            })?;

        let built = RowBuilder::new(&SALES_SCHEMA)
            .set("Serie", "FV")
            .set("Numar document", table.cell(row, nr_iesire).trim())
            .set("Data", date.as_str())
            .set("Data scadenta", date.as_str())
            .set("Nume partener", partner)
            .set("Cod fiscal", table.cell(row, cod_fiscal).trim())
            .set("Moneda", "RON")
            .set("Denumire articol", table.cell(row, den_tip).trim())
            .set("Cantitate", table.cell(row, cantitate).trim())
            .set("Valoare fara tva", table.cell(row, valoare).trim())
            .set("Val TVA", table.cell(row, tva).trim())
            .set("Optiune TVA", "TAXABILE")
            .set("Cota TVA", table.cell(row, tva_art).trim())
            .build();
        output.push_row(built)?;
    }

    debug!(
        input_rows = table.rows.len(),
        output_rows = output.len(),
        skipped,
        "built sales invoice rows"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_table(rows: Vec<Vec<&str>>) -> RawTable {
        let mut table = RawTable::new(
            "sales.csv",
            REQUIRED_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        );
        table.rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        table
    }

    fn row(values: [&str; 12]) -> Vec<&str> {
        values.to_vec()
    }

    #[test]
    fn internal_transfer_partners_are_filtered_out() {
        let table = sales_table(vec![
            row([
                "2025-04-01", "77", "paine", "paine alba", "G1", "2", "5.00", "10.00",
                "Client Marfa", "", "11", "1.10",
            ]),
            row([
                "2025-04-01", "78", "meniu", "meniu zilei", "G1", "1", "25.00", "25.00",
                "SC EXEMPLU SRL", "RO123", "11", "2.75",
            ]),
        ]);
        let output = sales_rows(&table).unwrap();
        assert_eq!(output.len(), 1);

        let idx = |name: &str| {
            SALES_SCHEMA
                .columns
                .iter()
                .position(|c| c.name == name)
                .unwrap()
        };
        assert_eq!(output.rows[0][idx("Serie")], "FV");
        assert_eq!(output.rows[0][idx("Numar document")], "78");
        assert_eq!(output.rows[0][idx("Data")], "20250401");
        assert_eq!(output.rows[0][idx("Nume partener")], "SC EXEMPLU SRL");
        assert_eq!(output.rows[0][idx("Moneda")], "RON");
        assert_eq!(output.rows[0][idx("Valoare fara tva")], "25.00");
        assert_eq!(output.rows[0][idx("Val TVA")], "2.75");
        assert_eq!(output.rows[0][idx("Cota TVA")], "11");
        assert_eq!(output.rows[0][idx("Optiune TVA")], "TAXABILE");
    }

    #[test]
    fn missing_columns_are_reported_together() {
        let mut table = RawTable::new(
            "sales.csv",
            vec!["data".to_string(), "tert".to_string()],
        );
        table.rows.push(vec!["2025-04-01".to_string(), "x".to_string()]);
        let err = sales_rows(&table).unwrap_err();
        match err {
            ConvError::SchemaMismatch { missing } => {
                assert!(missing.contains(&"nr_iesire".to_string()));
                assert!(missing.contains(&"tva".to_string()));
                assert_eq!(missing.len(), 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_date_reports_the_row() {
        let table = sales_table(vec![row([
            "01/04/2025", "77", "paine", "paine alba", "G1", "2", "5.00", "10.00", "SC X",
            "", "11", "1.10",
        ])]);
        let err = sales_rows(&table).unwrap_err();
        match err {
            ConvError::ValueParse { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "data");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
