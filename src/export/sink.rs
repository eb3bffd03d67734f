//! Output sinks for exported documents.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination of exported Markdown files.
///
/// Paths are relative to the sink's root. Any error returned here aborts
/// the export run.
pub trait Sink {
    /// Create a directory (and its parents) if it does not exist yet.
    fn ensure_directory(&mut self, path: &Path) -> Result<()>;

    /// Write a file, replacing existing content.
    fn write(&mut self, relative_path: &Path, content: &str) -> Result<()>;
}

/// Sink writing to a directory on disk.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Create a sink rooted at `root`. Nothing is created until used.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this sink.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for FsSink {
    fn ensure_directory(&mut self, path: &Path) -> Result<()> {
        let dir = self.root.join(path);
        if dir.exists() && !dir.is_dir() {
            return Err(Error::sink(
                &dir,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path exists but is not a directory",
                ),
            ));
        }
        fs::create_dir_all(&dir).map_err(|e| Error::sink(&dir, e))
    }

    fn write(&mut self, relative_path: &Path, content: &str) -> Result<()> {
        let path = self.root.join(relative_path);
        fs::write(&path, content).map_err(|e| Error::sink(&path, e))?;
        log::debug!("wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Sink keeping files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemorySink {
    /// Create an empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a written file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All written files, ordered by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Directories requested so far.
    pub fn directories(&self) -> &BTreeSet<PathBuf> {
        &self.directories
    }

    /// Number of written files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file was written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Sink for MemorySink {
    fn ensure_directory(&mut self, path: &Path) -> Result<()> {
        self.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write(&mut self, relative_path: &Path, content: &str) -> Result<()> {
        self.files
            .insert(relative_path.to_path_buf(), content.to_string());
        Ok(())
    }
}
