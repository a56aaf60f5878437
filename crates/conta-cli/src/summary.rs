//! Run summary and pattern listing tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use conta_patterns::{Pattern, TargetFormat};

use crate::commands::{ConvertResult, family_label};

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_summary(result: &ConvertResult) {
    println!("Output: {}", result.output_dir.display());

    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Output file"),
        header_cell("Rows"),
        header_cell("Bytes"),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_rows = 0usize;
    for file in &result.files {
        total_rows += file.rows;
        table.add_row(vec![
            Cell::new(&file.filename),
            Cell::new(file.rows),
            Cell::new(file.bytes),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    println!("{table}");
}

pub fn print_patterns<'a>(patterns: impl Iterator<Item = &'a Pattern>) {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Pattern"),
        header_cell("Family"),
        header_cell("Filename tokens"),
        header_cell("Serie"),
        header_cell("Output"),
        header_cell("Format"),
    ]);

    for pattern in patterns {
        let format = match pattern.output.format {
            TargetFormat::Csv => "CSV",
            TargetFormat::Xlsx => "XLSX",
        };
        table.add_row(vec![
            Cell::new(pattern.name),
            Cell::new(family_label(pattern.family)),
            Cell::new(pattern.filename_tokens.join(", ")),
            Cell::new(pattern.output.serie),
            Cell::new(pattern.output.output_name),
            Cell::new(format),
        ]);
    }
    println!("{table}");
}
