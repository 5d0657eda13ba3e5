//! Non-fatal findings collected during a generation run.

use std::fmt;
use std::path::PathBuf;

/// A warning surfaced after the run completes. Never halts processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two resources normalized to the same identifier; the later one was dropped.
    Collision {
        identifier: String,
        kept: String,
        skipped: String,
    },

    /// A resource root matched the ignore list and was not traversed.
    IgnoredRoot { root: PathBuf, pattern: String },
}

impl Diagnostic {
    /// Short machine friendly label for the diagnostic kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::Collision { .. } => "collision",
            Diagnostic::IgnoredRoot { .. } => "ignored-root",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Collision {
                identifier,
                kept,
                skipped,
            } => write!(
                f,
                "multiple resources map to {identifier}: keeping '{kept}', skipping '{skipped}'"
            ),
            Diagnostic::IgnoredRoot { root, pattern } => write!(
                f,
                "skipping resource folder {} (matches ignore pattern '{pattern}')",
                root.display()
            ),
        }
    }
}
