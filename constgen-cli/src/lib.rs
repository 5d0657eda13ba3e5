//! # constgen-cli
//!
//! CLI library for generating C# constants classes from a Unity project.
//!
//! This crate provides the project-facing side of the `constgen` tool:
//! reading project settings, writing output files and watching for changes.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`unity`] - Unity project host (tags, layers, scenes, asset walks)
//! - [`writer`] - File output and dry-run support
//! - [`check`] - Up-to-date comparison of generated files
//! - [`watcher`] - File system watching for development mode
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Error types and handling

pub mod check;
pub mod config;
pub mod error;
pub mod logging;
pub mod unity;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use unity::UnityProject;
pub use watcher::FileWatcher;
pub use writer::FileWriter;
