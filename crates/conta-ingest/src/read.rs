//! Raw tabular readers: CSV via the `csv` crate, XLSX via `calamine`.
//!
//! Readers produce an untyped [`RawTable`]; all typing happens later in the
//! normalizer against a pattern's declared column types.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader};
use conta_model::{ConvError, RawTable, Result};
use tracing::debug;

pub fn read_csv_bytes(source_name: &str, bytes: &[u8]) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = RawTable::new(source_name, headers);
    for record in reader.records() {
        let record = record?;
        table
            .rows
            .push(record.iter().map(|c| c.to_string()).collect());
    }

    debug!(
        source = source_name,
        rows = table.rows.len(),
        "read csv input"
    );
    Ok(table)
}

pub fn read_csv_path(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path)?;
    read_csv_bytes(&file_name(path), &bytes)
}

/// Read the first worksheet that contains any data.
///
/// The source workbooks carry a single meaningful sheet; trailing empty
/// sheets (chart leftovers) are skipped.
pub fn read_xlsx_bytes(source_name: &str, bytes: &[u8]) -> Result<RawTable> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| ConvError::Excel(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ConvError::Excel(e.to_string()))?;
        if range.is_empty() {
            continue;
        }

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|r| r.iter().map(cell_to_string).collect())
            .unwrap_or_default();

        let mut table = RawTable::new(source_name, headers);
        for row in rows {
            table.rows.push(row.iter().map(cell_to_string).collect());
        }

        debug!(
            source = source_name,
            sheet = name.as_str(),
            rows = table.rows.len(),
            "read xlsx input"
        );
        return Ok(table);
    }

    Err(ConvError::EmptyWorkbook {
        filename: source_name.to_string(),
    })
}

pub fn read_xlsx_path(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path)?;
    read_xlsx_bytes(&file_name(path), &bytes)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Excel stores integers as floats; keep "15" readable as "15".
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_reader_trims_headers_and_keeps_cells() {
        let table = read_csv_bytes("t.csv", b" A , B\n1,x\n2,y\n").unwrap();
        assert_eq!(table.headers, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, 1), "y");
    }

    #[test]
    fn csv_reader_tolerates_short_rows() {
        let table = read_csv_bytes("t.csv", b"A,B,C\n1,2\n").unwrap();
        assert_eq!(table.cell(0, 2), "");
    }

    #[test]
    fn float_cells_render_integers_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(15.0)), "15");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
