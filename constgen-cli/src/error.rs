//! Error types for the CLI.
//!
//! Generation failures of a single class are not errors at this level; they
//! are part of the [`GenerationReport`](constgen::GenerationReport). Everything
//! here aborts the command.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// The project directory is not usable.
    #[error("Invalid project: {0}")]
    Project(#[from] constgen::HostError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Some classes could not be generated; the others were written.
    #[error("{0} class(es) could not be generated")]
    Incomplete(usize),

    /// Generated files are missing or out of date.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// `init` would overwrite an existing file.
    #[error("Configuration file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),

    /// Error from notify crate.
    #[error("Watch notification error: {0}")]
    Notify(String),
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an already exists error.
    pub fn already_exists(path: PathBuf) -> Self {
        Self::AlreadyExists { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Validation(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Validation("stale".to_string()).exit_code(), 2);
        let io = std::io::Error::other("boom");
        assert_eq!(CliError::from(io).exit_code(), 1);
    }

    #[test]
    fn test_existing_config_is_not_a_stale_check() {
        let err = CliError::from(ConfigError::already_exists(PathBuf::from("constgen.toml")));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("use --force"));
    }

    #[test]
    fn test_write_error_message() {
        let err = CliError::from(WriteError::CreateDir {
            path: PathBuf::from("Assets/scripts"),
            source: std::io::Error::other("read-only"),
        });
        assert_eq!(
            err.to_string(),
            "Failed to write output: Failed to create directory Assets/scripts: read-only"
        );
    }
}
