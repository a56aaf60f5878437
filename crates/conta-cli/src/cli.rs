//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use conta_model::ProcessMode;

#[derive(Parser)]
#[command(
    name = "conta",
    version,
    about = "Convert POS and register exports into accounting import files",
    long_about = "Convert POS payment exports and Borderou register workbooks\n\
                  into the fixed-format CSV/XLSX files the accounting system\n\
                  imports. File families are recognized by declared patterns;\n\
                  unrecognized files are rejected, never guessed at."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert one or more exports in the selected processing mode.
    Convert(ConvertArgs),

    /// List the registered file patterns.
    Patterns,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Processing mode.
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Input files (CSV or XLSX exports).
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Borderou,
    Cardcec,
    Sales,
    Adaos,
    Sgr,
    Minus,
    Extract,
}

impl From<ModeArg> for ProcessMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Borderou => ProcessMode::Borderou,
            ModeArg::Cardcec => ProcessMode::CardCec,
            ModeArg::Sales => ProcessMode::Sales,
            ModeArg::Adaos => ProcessMode::Adaos,
            ModeArg::Sgr => ProcessMode::Sgr,
            ModeArg::Minus => ProcessMode::Minus,
            ModeArg::Extract => ProcessMode::Extract,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
