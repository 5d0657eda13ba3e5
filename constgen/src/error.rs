//! Error types for constants generation.
//!
//! Errors here are fatal to the class being generated, never to the whole
//! run. Non-fatal findings are [`Diagnostic`](crate::diagnostics::Diagnostic)s.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error that aborts generation of a single class.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A raw name could not be turned into an identifier.
    #[error("Cannot derive an identifier from {}: {message}", describe_raw(.raw))]
    MalformedName { raw: String, message: String },

    /// The host listed a layer it cannot resolve to an index.
    #[error("Layer '{name}' has no index")]
    UnknownLayer { name: String },

    /// The host could not provide the names for this class.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Error raised by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Error)]
pub enum HostError {
    /// A settings file the host reads from does not exist.
    #[error("Settings file not found: {path}")]
    MissingSettings { path: PathBuf },

    /// A settings file exists but could not be understood.
    #[error("Invalid settings in {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    /// A directory could not be walked.
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// IO error while reading host state.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_raw(raw: &str) -> String {
    if raw.is_empty() {
        "an empty name".to_string()
    } else {
        format!("'{raw}'")
    }
}

impl GenerateError {
    /// Create a malformed name error.
    pub fn malformed(raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedName {
            raw: raw.into(),
            message: message.into(),
        }
    }
}

impl HostError {
    /// Create a missing settings error.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingSettings { path: path.into() }
    }

    /// Create an invalid settings error.
    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a walk error.
    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: message.into(),
        }
    }
}
