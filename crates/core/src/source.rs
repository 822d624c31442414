//! Source provider abstraction for filesystem-independent conversion.
//!
//! [`SourceProvider`] stands between the passes and the files they read, so
//! the whole pipeline can run against in-memory text in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait SourceProvider {
    /// Read the full text of `path`.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;

    /// Whether `path` names something that can be read.
    fn exists(&self, path: &Path) -> bool;
}

/// Default provider backed by `std::fs`.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory provider for tests. Paths are looked up after `.`/`..`
/// normalization, without touching the filesystem.
#[derive(Default)]
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        Self { files }
    }

    /// Add or replace one file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = Self::normalize_path(&path.into());
        self.files.insert(path, text.into());
        self
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                std::path::Component::CurDir => {}
                std::path::Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&Self::normalize_path(path))
    }
}
