//! CardCec flow: one POS payment export in, one import CSV out.

use conta_ingest::{normalize_payments, read_csv_bytes, read_xlsx_bytes};
use conta_model::{InputFile, MIME_CSV, OutputFile, Result};
use conta_output::write_csv_bytes;
use conta_patterns::{PatternFamily, PatternRegistry};
use conta_transform::{cardcec_rows, group_by_date};
use tracing::info;

pub fn process_cardcec(registry: &PatternRegistry, file: &InputFile) -> Result<OutputFile> {
    let table = match file.extension().as_deref() {
        Some("xlsx" | "xls") => read_xlsx_bytes(&file.filename, &file.bytes)?,
        _ => read_csv_bytes(&file.filename, &file.bytes)?,
    };
    let pattern = registry.match_file(
        PatternFamily::CardCec,
        &file.filename,
        Some(&table.headers),
    )?;

    let records = normalize_payments(&table, pattern)?;
    let groups = group_by_date(&records);
    let rows = cardcec_rows(&groups, pattern)?;
    let bytes = write_csv_bytes(&rows)?;

    info!(
        source = file.filename.as_str(),
        pattern = pattern.name,
        records = records.len(),
        documents = groups.len(),
        rows = rows.len(),
        "cardcec transform finished"
    );
    Ok(OutputFile {
        filename: pattern.output.output_name.to_string(),
        mime_type: MIME_CSV,
        bytes,
        rows: rows.len(),
    })
}
