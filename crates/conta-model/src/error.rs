use thiserror::Error;

/// Errors surfaced by the conversion core.
///
/// Every variant is local to one request; nothing is retried here. The HTTP
/// layer (an external collaborator) maps these to user-visible messages.
#[derive(Debug, Error)]
pub enum ConvError {
    /// No registered pattern recognizes the uploaded file.
    #[error("no pattern matches file '{filename}'; check the selected mode and the file name")]
    NoMatch { filename: String },

    /// One or more mapped source columns are absent from the input header.
    #[error("expected column(s) missing from input: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A cell could not be parsed as the type the pattern declares.
    #[error("row {row}, column '{column}': cannot parse '{value}' as {expected}")]
    ValueParse {
        /// 1-based data row index (header excluded).
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// A Borderou pipeline stage failed; the cause is preserved.
    #[error("pipeline stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<ConvError>,
    },

    /// The selected mode is handled by a legacy processor outside this core.
    #[error("processing mode '{mode}' is not handled by this converter")]
    UnsupportedMode { mode: String },

    /// A pattern failed validation at registration time.
    #[error("pattern '{name}' is invalid: {reason}")]
    InvalidPattern { name: String, reason: String },

    /// Strict registration refused to overwrite an existing pattern.
    #[error("a pattern named '{name}' is already registered")]
    DuplicateKind { name: String },

    /// The workbook has no usable sheet.
    #[error("workbook '{filename}' contains no sheet with data")]
    EmptyWorkbook { filename: String },

    #[error("excel error: {0}")]
    Excel(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvError {
    /// Wrap an error as a stage failure, keeping the original as the cause.
    pub fn in_stage(self, stage: &'static str) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvError>;
