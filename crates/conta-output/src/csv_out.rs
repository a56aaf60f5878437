//! CSV serialization of output tables.

use std::fs::File;
use std::path::Path;

use conta_model::{OutputTable, Result};
use tracing::debug;

/// Serialize a table to CSV bytes, header first.
pub fn write_csv_bytes(table: &OutputTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.schema.header())?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    debug!(schema = table.schema.name, rows = table.len(), "wrote csv");
    Ok(bytes)
}

pub fn write_csv_path(table: &OutputTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(table.schema.header())?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use conta_model::RowBuilder;
    use conta_patterns::IMPORT_SCHEMA;

    use super::*;

    #[test]
    fn header_line_matches_the_schema_exactly() {
        let mut table = OutputTable::new(&IMPORT_SCHEMA);
        table
            .push_row(
                RowBuilder::new(&IMPORT_SCHEMA)
                    .set("Serie document", "F")
                    .set("Numar document", "1")
                    .build(),
            )
            .unwrap();
        let bytes = write_csv_bytes(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.lines().next().unwrap();
        assert!(first_line.starts_with("Serie document,Numar document,Cod depozit"));
        assert!(first_line.ends_with("Discount,DiscountLinie"));
        assert_eq!(text.lines().count(), 2);
    }
}
