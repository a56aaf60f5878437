//! Per-request working directory for pipeline stage artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use conta_model::Result;
use tempfile::TempDir;
use tracing::debug;

/// Scratch directory holding one request's intermediate files.
///
/// Every stage writes its artifact under its own subdirectory. Nothing is
/// shared across requests and the whole tree is removed on drop, so a
/// failed run leaves no partial output behind.
#[derive(Debug)]
pub struct WorkDir {
    root: TempDir,
}

impl WorkDir {
    pub fn new() -> Result<Self> {
        let root = TempDir::with_prefix("conta-")?;
        debug!(path = %root.path().display(), "created work directory");
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path for one stage artifact; the stage subdirectory is created on
    /// first use.
    pub fn stage_path(&self, stage: &str, filename: &str) -> Result<PathBuf> {
        let dir = self.root.path().join(stage);
        fs::create_dir_all(&dir)?;
        Ok(dir.join(filename))
    }
}
