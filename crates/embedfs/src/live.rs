//! Live filesystem backend.
//!
//! A read-only view of a directory on the host disk. Nothing is cached; every
//! call goes to the filesystem, so edits made during development show up on
//! the next read.

use crate::error::{Error, Result};
use crate::fs::{DirEntry, FsSource, Metadata, ReadOnlyFs};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Read-only view of a host directory.
///
/// All operations are relative to `root`. For example, if `root` is
/// `./assets`, then `read("css/site.css")` reads `./assets/css/site.css`.
///
/// # Examples
///
/// ```
/// use embedfs::{DirFs, ReadOnlyFs};
/// use std::path::Path;
/// # use tempfile::TempDir;
///
/// # let temp = TempDir::new().unwrap();
/// # std::fs::write(temp.path().join("hello.txt"), "hi").unwrap();
/// let fsys = DirFs::new(temp.path());
/// assert_eq!(fsys.read(Path::new("hello.txt")).unwrap(), b"hi");
/// ```
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Creates a view rooted at `root`.
    ///
    /// The root is not checked here; use [`crate::Selector`] for a checked
    /// construction.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative path under the root.
    ///
    /// Absolute paths and `..` components are rejected so lookups cannot
    /// leave the root.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let mut full = self.root.clone();
        for component in path.components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(Error::InvalidPath {
                        path: path.display().to_string(),
                        reason: "path escapes root",
                    });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::InvalidPath {
                        path: path.display().to_string(),
                        reason: "path must be relative",
                    });
                }
            }
        }
        Ok(full)
    }
}

impl ReadOnlyFs for DirFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        fs::read(&full_path).map_err(|e| Error::from_io(path.display().to_string(), e))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata> {
        let full_path = self.resolve(path)?;
        let meta =
            fs::metadata(&full_path).map_err(|e| Error::from_io(path.display().to_string(), e))?;

        Ok(Metadata {
            is_dir: meta.is_dir(),
            len: if meta.is_dir() { 0 } else { meta.len() },
        })
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let full_path = self.resolve(path)?;
        let shown = || path.display().to_string();

        if !self.metadata(path)?.is_dir {
            return Err(Error::NotADirectory { path: shown() });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(|e| Error::from_io(shown(), e))? {
            let entry = entry.map_err(|e| Error::from_io(shown(), e))?;
            // Follow symlinks so a linked directory lists as a directory
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn source(&self) -> FsSource {
        FsSource::Live
    }
}
