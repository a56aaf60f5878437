//! XLSX serialization of output tables.

use std::path::Path;

use conta_model::{ColumnKind, ConvError, OutputTable, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

fn excel_err(e: rust_xlsxwriter::XlsxError) -> ConvError {
    ConvError::Excel(e.to_string())
}

/// Cells in money columns become real numbers with a two-decimal format so
/// the workbook opens with the amounts the ledger operators expect; integer
/// columns become plain numbers. Anything unparseable stays text.
fn fill_worksheet(worksheet: &mut Worksheet, table: &OutputTable) -> Result<()> {
    let money = Format::new().set_num_format("0.00");

    for (col, spec) in table.schema.columns.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| ConvError::Excel("too many columns".into()))?;
        worksheet.write_string(0, col, spec.name).map_err(excel_err)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = row_idx as u32 + 1;
        for (col_idx, (cell, spec)) in row.iter().zip(table.schema.columns).enumerate() {
            let col = col_idx as u16;
            if cell.is_empty() {
                continue;
            }
            match spec.kind {
                ColumnKind::Money => match cell.parse::<f64>() {
                    Ok(value) => {
                        worksheet
                            .write_number_with_format(excel_row, col, value, &money)
                            .map_err(excel_err)?;
                    }
                    Err(_) => {
                        worksheet
                            .write_string(excel_row, col, cell)
                            .map_err(excel_err)?;
                    }
                },
                ColumnKind::Integer => match cell.parse::<i64>() {
                    Ok(value) => {
                        worksheet
                            .write_number(excel_row, col, value as f64)
                            .map_err(excel_err)?;
                    }
                    Err(_) => {
                        worksheet
                            .write_string(excel_row, col, cell)
                            .map_err(excel_err)?;
                    }
                },
                ColumnKind::Text | ColumnKind::Date => {
                    worksheet
                        .write_string(excel_row, col, cell)
                        .map_err(excel_err)?;
                }
            }
        }
    }
    Ok(())
}

fn build_workbook(table: &OutputTable, sheet_name: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(excel_err)?;
    fill_worksheet(worksheet, table)?;
    Ok(workbook)
}

/// Serialize a table to XLSX bytes with a single named worksheet.
pub fn write_xlsx_bytes(table: &OutputTable, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    let bytes = workbook.save_to_buffer().map_err(excel_err)?;
    debug!(schema = table.schema.name, rows = table.len(), "wrote xlsx");
    Ok(bytes)
}

pub fn write_xlsx_path(table: &OutputTable, sheet_name: &str, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path).map_err(excel_err)?;
    Ok(())
}
