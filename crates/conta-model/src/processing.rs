use serde::{Deserialize, Serialize};

pub const MIME_CSV: &str = "text/csv";
pub const MIME_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Processing mode selected by the caller (the upload form's selector).
///
/// `Adaos`, `Sgr`, `Minus` and `Extract` are single-sheet legacy processors
/// that live with the external collaborator; selecting them here yields
/// [`crate::ConvError::UnsupportedMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    Adaos,
    Sgr,
    Minus,
    Extract,
    Borderou,
    CardCec,
    Sales,
}

impl ProcessMode {
    pub const ALL: [ProcessMode; 7] = [
        ProcessMode::Adaos,
        ProcessMode::Sgr,
        ProcessMode::Minus,
        ProcessMode::Extract,
        ProcessMode::Borderou,
        ProcessMode::CardCec,
        ProcessMode::Sales,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adaos => "adaos",
            Self::Sgr => "sgr",
            Self::Minus => "minus",
            Self::Extract => "extract",
            Self::Borderou => "borderou",
            Self::CardCec => "cardcec",
            Self::Sales => "sales",
        }
    }
}

impl std::fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One uploaded file: raw bytes plus the original client-side name.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// File extension, lowercased: exports arrive with whatever casing the
    /// client OS produced.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

/// One produced file, ready for direct download.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    /// Data rows written (header excluded), for the run summary.
    pub rows: usize,
}

/// Request from the HTTP layer: one batch of files plus the mode selector.
/// All per-request parameters arrive here; the core reads no other config.
#[derive(Debug)]
pub struct ProcessRequest {
    pub mode: ProcessMode,
    pub files: Vec<InputFile>,
}

/// Result of one synchronous processing request.
///
/// Normally one output file; the Borderou business-unit split produces one
/// workbook per unit and the caller archives multiples.
#[derive(Debug)]
pub struct ProcessResponse {
    pub mode: ProcessMode,
    pub files: Vec<OutputFile>,
}
