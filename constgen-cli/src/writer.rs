//! Output of generated classes.
//!
//! Files whose content already matches are left untouched, so an unchanged
//! class keeps its timestamp and is not reimported by the editor.

use crate::error::{CliError, CliResult, WriteError};
use constgen::OutputSink;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of writing one generated file.
#[derive(Debug)]
pub enum WriteResult {
    /// New content was written.
    Written { path: PathBuf, bytes: usize },
    /// The file already held this exact content.
    Unchanged { path: PathBuf },
    /// Dry run; nothing touched the disk.
    DryRun { content: String, path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Whether the file on disk was replaced.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Bytes written, 0 unless the file was replaced.
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}

/// Writes generated files, or only reports them in dry-run mode.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `path`, creating missing parent directories.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if std::fs::read(path).is_ok_and(|existing| existing == content.as_bytes()) {
            debug!(path = %path.display(), "Output unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent().filter(|parent| !parent.is_dir()) {
            std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Sink placing every generated class in `dir`.
    pub fn sink(&self, dir: impl Into<PathBuf>) -> DirectorySink<'_> {
        DirectorySink {
            writer: self,
            dir: dir.into(),
            results: Vec::new(),
            reimported: Vec::new(),
        }
    }
}

/// [`OutputSink`] over one output directory.
///
/// Reimport is bookkeeping only: nothing is sent to the editor. Unity notices
/// the replaced files itself the next time it refreshes its asset database;
/// [`reimported`](Self::reimported) lists which files that will be.
#[derive(Debug)]
pub struct DirectorySink<'a> {
    writer: &'a FileWriter,
    dir: PathBuf,
    results: Vec<WriteResult>,
    reimported: Vec<PathBuf>,
}

impl DirectorySink<'_> {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One result per written class, in write order.
    pub fn results(&self) -> &[WriteResult] {
        &self.results
    }

    /// Files flagged for reimport.
    pub fn reimported(&self) -> &[PathBuf] {
        &self.reimported
    }

    pub fn into_results(self) -> Vec<WriteResult> {
        self.results
    }
}

impl OutputSink for DirectorySink<'_> {
    type Error = CliError;

    fn write(&mut self, file_name: &str, content: &str) -> Result<(), Self::Error> {
        let result = self.writer.write(&self.dir.join(file_name), content)?;
        self.results.push(result);
        Ok(())
    }

    /// Records `file_name` if this run replaced it; sends no notification.
    fn reimport(&mut self, file_name: &str) -> Result<(), Self::Error> {
        let path = self.dir.join(file_name);
        let replaced = self
            .results
            .iter()
            .any(|result| result.was_written() && result.path() == path);
        if replaced {
            debug!(path = %path.display(), "Flagged for reimport");
            self.reimported.push(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tags.cs");
        let content = "public const string PLAYER = \"Player\";";

        let result = FileWriter::new(false).write(&path, content).unwrap();

        assert!(result.was_written());
        assert_eq!(result.bytes(), content.len());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_write_replaces_different_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tags.cs");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        let result = FileWriter::new(false).write(&path, "new").unwrap();

        assert!(result.was_written());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tags.cs");
        std::fs::write(&path, "namespace k {}").unwrap();

        let result = FileWriter::new(false).write(&path, "namespace k {}").unwrap();

        assert!(matches!(result, WriteResult::Unchanged { .. }));
        assert!(!result.was_written());
        assert_eq!(result.path(), path);
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scripts/auto-generated/Tags.cs");

        let result = FileWriter::new(false).write(&path, "namespace k {}").unwrap();

        assert!(result.was_written());
        assert!(path.exists());
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scripts"), "not a directory").unwrap();

        let result = FileWriter::new(false).write(&dir.path().join("scripts/Tags.cs"), "x");

        assert!(matches!(result, Err(CliError::Write(_))));
    }

    #[test]
    fn test_dry_run_keeps_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tags.cs");

        let result = FileWriter::new(true).write(&path, "namespace k {}").unwrap();

        assert!(!path.exists());
        assert_eq!(result.bytes(), 0);
        match result {
            WriteResult::DryRun { content, .. } => assert_eq!(content, "namespace k {}"),
            other => panic!("expected dry run, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_sink() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);
        let mut sink = writer.sink(dir.path().join("out"));

        sink.write("Tags.cs", "a").unwrap();
        sink.write("Layers.cs", "b").unwrap();
        sink.reimport("Tags.cs").unwrap();

        assert_eq!(sink.results().len(), 2);
        assert_eq!(sink.reimported(), &[dir.path().join("out/Tags.cs")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out/Layers.cs")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_directory_sink_skips_reimport_of_unchanged_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Tags.cs"), "a").unwrap();
        let writer = FileWriter::new(false);
        let mut sink = writer.sink(dir.path());

        sink.write("Tags.cs", "a").unwrap();
        sink.write("Layers.cs", "b").unwrap();
        sink.reimport("Tags.cs").unwrap();
        sink.reimport("Layers.cs").unwrap();

        assert_eq!(sink.reimported(), &[dir.path().join("Layers.cs")]);
    }

    #[test]
    fn test_directory_sink_dry_run_skips_reimport() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(true);
        let mut sink = writer.sink(dir.path());

        sink.write("Tags.cs", "a").unwrap();
        sink.reimport("Tags.cs").unwrap();

        assert!(sink.reimported().is_empty());
        assert!(!sink.results()[0].was_written());
    }
}
