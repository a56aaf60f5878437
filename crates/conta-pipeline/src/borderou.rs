//! Staged Borderou flow: extract, clean, convert, split and write.

use std::fs::File;
use std::path::Path;

use conta_ingest::{normalize_borderou, read_csv_path, read_xlsx_bytes};
use conta_model::{
    BorderouRecord, InputFile, MIME_CSV, MIME_XLSX, OutputFile, RawTable, Result,
};
use conta_output::{write_csv_bytes, write_csv_path, write_xlsx_bytes};
use conta_patterns::{Pattern, PatternFamily, PatternRegistry, TargetFormat};
use conta_transform::borderou_rows;
use tracing::info;

use crate::clean::clean_borderou;
use crate::workdir::WorkDir;

fn write_raw_artifact(table: &RawTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn artifact_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Run the full Borderou pipeline for one workbook.
///
/// Stage artifacts live in a fresh [`WorkDir`] that is dropped on return,
/// success or failure. Split patterns produce one output file per business
/// unit present in the data; plain patterns produce exactly one.
pub fn process_borderou(registry: &PatternRegistry, file: &InputFile) -> Result<Vec<OutputFile>> {
    let pattern = registry.match_file(PatternFamily::Borderou, &file.filename, None)?;
    let workdir = WorkDir::new()?;
    let stem = artifact_stem(&file.filename);

    // Stage 1: pull the first populated sheet out of the workbook.
    let raw = extract(file, &workdir, stem).map_err(|e| e.in_stage("extract"))?;

    // Stage 2: standardize into the 19-column cleaned artifact.
    let cleaned_path = workdir.stage_path("cleaned", &format!("{stem}_cleaned.csv"))?;
    let cleaned = clean_borderou(&raw).map_err(|e| e.in_stage("clean"))?;
    write_csv_path(&cleaned, &cleaned_path).map_err(|e| e.in_stage("clean"))?;

    // Stage 3: reread the artifact and normalize into canonical records.
    let records = convert(&cleaned_path, pattern).map_err(|e| e.in_stage("convert"))?;

    // Stage 4: partition by business unit and serialize.
    let outputs = assemble(&records, pattern).map_err(|e| e.in_stage("assemble"))?;

    info!(
        source = file.filename.as_str(),
        pattern = pattern.name,
        records = records.len(),
        outputs = outputs.len(),
        "borderou pipeline finished"
    );
    Ok(outputs)
}

fn extract(file: &InputFile, workdir: &WorkDir, stem: &str) -> Result<RawTable> {
    let raw = match file.extension().as_deref() {
        Some("xlsx" | "xls") => read_xlsx_bytes(&file.filename, &file.bytes)?,
        _ => conta_ingest::read_csv_bytes(&file.filename, &file.bytes)?,
    };
    let raw_path = workdir.stage_path("csv", &format!("{stem}.csv"))?;
    write_raw_artifact(&raw, &raw_path)?;
    Ok(raw)
}

fn convert(cleaned_path: &Path, pattern: &Pattern) -> Result<Vec<BorderouRecord>> {
    let table = read_csv_path(cleaned_path)?;
    normalize_borderou(&table, pattern)
}

fn assemble(records: &[BorderouRecord], pattern: &Pattern) -> Result<Vec<OutputFile>> {
    let mut outputs = Vec::new();

    match &pattern.split {
        Some(split) => {
            for unit in split.units {
                let unit_records: Vec<BorderouRecord> = records
                    .iter()
                    .filter(|r| {
                        split.unit_for(&r.document_number.to_string(), &r.note) == unit.id
                    })
                    .cloned()
                    .collect();
                if unit_records.is_empty() {
                    continue;
                }
                let serie = format!("{} {}", pattern.output.serie, unit.id);
                let table = borderou_rows(&unit_records, pattern, Some(&serie))?;
                let filename = pattern.output.output_name.replace("{unit}", unit.id);
                outputs.push(serialize(&table, pattern, filename)?);
            }
        }
        None => {
            let table = borderou_rows(records, pattern, None)?;
            outputs.push(serialize(&table, pattern, pattern.output.output_name.to_string())?);
        }
    }
    Ok(outputs)
}

fn serialize(
    table: &conta_model::OutputTable,
    pattern: &Pattern,
    filename: String,
) -> Result<OutputFile> {
    let (bytes, mime_type) = match pattern.output.format {
        TargetFormat::Csv => (write_csv_bytes(table)?, MIME_CSV),
        TargetFormat::Xlsx => (write_xlsx_bytes(table, "import")?, MIME_XLSX),
    };
    Ok(OutputFile {
        filename,
        mime_type,
        bytes,
        rows: table.len(),
    })
}
