//! Sales flow: raw sales export in, invoice import CSV out.

use std::path::Path;

use conta_ingest::{read_csv_bytes, read_xlsx_bytes};
use conta_model::{InputFile, MIME_CSV, OutputFile, Result};
use conta_output::write_csv_bytes;
use conta_transform::sales_rows;
use tracing::info;

pub fn process_sales(file: &InputFile) -> Result<OutputFile> {
    let table = match file.extension().as_deref() {
        Some("xlsx" | "xls") => read_xlsx_bytes(&file.filename, &file.bytes)?,
        _ => read_csv_bytes(&file.filename, &file.bytes)?,
    };
    let rows = sales_rows(&table)?;
    let bytes = write_csv_bytes(&rows)?;

    let stem = Path::new(&file.filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&file.filename);

    info!(
        source = file.filename.as_str(),
        rows = rows.len(),
        "sales transform finished"
    );
    Ok(OutputFile {
        filename: format!("sales - {stem}.csv"),
        mime_type: MIME_CSV,
        bytes,
        rows: rows.len(),
    })
}
