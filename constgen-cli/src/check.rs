//! Up-to-date check for generated files.

use constgen::GenerationReport;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a generated file does not match what would be generated now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    /// The file does not exist.
    Missing,
    /// The file exists with different content.
    Outdated,
}

/// A generated file that needs regenerating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub path: PathBuf,
    pub reason: Staleness,
}

impl fmt::Display for StaleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            Staleness::Missing => "missing",
            Staleness::Outdated => "out of date",
        };
        write!(f, "{} ({reason})", self.path.display())
    }
}

/// Compare every rendered file in `report` with its counterpart in `dir`.
///
/// Content is compared exactly; output is deterministic, so any difference
/// means the sources changed.
pub fn stale_files(report: &GenerationReport, dir: &Path) -> Vec<StaleFile> {
    report
        .files
        .iter()
        .filter_map(|file| {
            let path = dir.join(&file.file_name);
            let reason = match std::fs::read_to_string(&path) {
                Err(_) => Staleness::Missing,
                Ok(existing) if existing != file.content => Staleness::Outdated,
                Ok(_) => return None,
            };
            Some(StaleFile { path, reason })
        })
        .collect()
}
