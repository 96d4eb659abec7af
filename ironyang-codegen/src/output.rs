//! Output units and the sinks they are written to.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A generated file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Relative path, e.g. `gen/system/Clock.java`.
    pub path: PathBuf,
    /// File content.
    pub content: String,
}

impl OutputUnit {
    /// Creates a unit named `file` in directory `dir`.
    pub fn new(dir: impl AsRef<Path>, file: &str, content: String) -> Self {
        Self {
            path: dir.as_ref().join(file),
            content,
        }
    }
}

/// Destination for generated units.
pub trait OutputSink {
    /// Writes one unit.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the unit cannot be stored.
    fn write(&mut self, unit: &OutputUnit) -> io::Result<()>;
}

/// Sink keeping units in memory, ordered by path.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content stored at `path`.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.units.get(path.as_ref()).map(String::as_str)
    }

    /// Returns the stored paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.units.keys().map(PathBuf::as_path)
    }

    /// Returns the number of stored units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, unit: &OutputUnit) -> io::Result<()> {
        self.units.insert(unit.path.clone(), unit.content.clone());
        Ok(())
    }
}

/// Sink writing units below a root directory, overwriting existing files.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Creates a sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    fn write(&mut self, unit: &OutputUnit) -> io::Result<()> {
        let path = self.root.join(&unit.path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, &unit.content)?;
        tracing::debug!(path = %path.display(), "wrote output unit");
        Ok(())
    }
}
