//! Request-level orchestration of the conversion flows.

pub mod borderou;
pub mod cardcec;
pub mod clean;
pub mod sales;
pub mod workdir;

use conta_model::{ConvError, ProcessMode, ProcessRequest, ProcessResponse, Result};
use conta_patterns::PatternRegistry;
use tracing::info;

pub use borderou::process_borderou;
pub use cardcec::process_cardcec;
pub use sales::process_sales;
pub use workdir::WorkDir;

/// Process one request: every file runs through the flow the mode selects.
///
/// The legacy single-sheet modes are handled by an external collaborator;
/// selecting them here is an error, not a silent no-op.
pub fn process(registry: &PatternRegistry, request: &ProcessRequest) -> Result<ProcessResponse> {
    let mut files = Vec::new();

    for file in &request.files {
        match request.mode {
            ProcessMode::CardCec => files.push(process_cardcec(registry, file)?),
            ProcessMode::Borderou => files.extend(process_borderou(registry, file)?),
            ProcessMode::Sales => files.push(process_sales(file)?),
            ProcessMode::Adaos | ProcessMode::Sgr | ProcessMode::Minus | ProcessMode::Extract => {
                return Err(ConvError::UnsupportedMode {
                    mode: request.mode.to_string(),
                });
            }
        }
    }

    info!(
        mode = %request.mode,
        inputs = request.files.len(),
        outputs = files.len(),
        "request processed"
    );
    Ok(ProcessResponse {
        mode: request.mode,
        files,
    })
}
