//! Subcommand implementations.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use conta_model::{InputFile, ProcessRequest};
use conta_patterns::{PatternFamily, PatternRegistry};
use conta_pipeline::process;
use tracing::info;

use crate::cli::ConvertArgs;

/// Outcome of one `convert` run, for the summary table.
pub struct ConvertResult {
    pub output_dir: PathBuf,
    pub files: Vec<FileSummary>,
}

pub struct FileSummary {
    pub filename: String,
    pub rows: usize,
    pub bytes: usize,
}

pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<ConvertResult> {
    let registry = PatternRegistry::builtin();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut files = Vec::new();
    for path in &args.inputs {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("invalid input path {}", path.display()))?
            .to_string();
        let bytes =
            fs::read(path).with_context(|| format!("reading input {}", path.display()))?;
        let request = ProcessRequest {
            mode: args.mode.into(),
            files: vec![InputFile::new(filename.clone(), bytes)],
        };

        let response = process(&registry, &request)
            .with_context(|| format!("processing {filename}"))?;
        for output in response.files {
            let target = output_dir.join(&output.filename);
            fs::write(&target, &output.bytes)
                .with_context(|| format!("writing {}", target.display()))?;
            info!(output = %target.display(), rows = output.rows, "wrote output file");
            files.push(FileSummary {
                filename: output.filename,
                rows: output.rows,
                bytes: output.bytes.len(),
            });
        }
    }

    Ok(ConvertResult { output_dir, files })
}

pub fn run_patterns() -> anyhow::Result<()> {
    let registry = PatternRegistry::builtin();
    crate::summary::print_patterns(registry.iter());
    Ok(())
}

pub fn family_label(family: PatternFamily) -> &'static str {
    match family {
        PatternFamily::CardCec => "CardCec",
        PatternFamily::Borderou => "Borderou",
    }
}
