//! File watcher for development mode.
//!
//! This module provides file system watching functionality
//! to regenerate every constants class when project files change.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

/// Event types for file changes.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A file was modified or created.
    Modified(PathBuf),
    /// A file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// File watcher for monitoring a project.
pub struct FileWatcher {
    /// Directories to watch recursively.
    roots: Vec<PathBuf>,
    /// Changes below these paths never trigger an event.
    excluded: Vec<PathBuf>,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new file watcher for the given directories.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            excluded: Vec::new(),
            debounce_ms: 500,
        }
    }

    /// Ignore changes below `path`, e.g. the generator's own output.
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded.push(path.into());
        self
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Whether a change to `path` should trigger regeneration.
    pub fn is_relevant(&self, path: &Path) -> bool {
        if self.excluded.iter().any(|excluded| path.starts_with(excluded)) {
            return false;
        }
        // Unity rewrites sidecars on import; the asset itself is what matters.
        path.extension().is_none_or(|ext| ext != "meta")
    }

    /// Start watching for file changes.
    ///
    /// Returns the debouncer, which must be kept alive, and a receiver that
    /// yields watch events.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let filter = FileWatcher {
            roots: Vec::new(),
            excluded: self.excluded.clone(),
            debounce_ms: self.debounce_ms,
        };

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;
                        if !filter.is_relevant(&path) {
                            continue;
                        }

                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };

                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        for root in &self.roots {
            debouncer
                .watcher()
                .watch(root, RecursiveMode::Recursive)
                .map_err(|e| WatchError::Notify(format!("{}: {e}", root.display())))?;
        }

        Ok((debouncer, rx))
    }

    /// Get the directories being watched.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
