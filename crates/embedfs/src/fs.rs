//! The read-only filesystem capability shared by both backends.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// Which backend serves a filesystem handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsSource {
    /// A directory on the host disk.
    Live,
    /// A tree bundled into the binary.
    Embedded,
}

impl fmt::Display for FsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Embedded => f.write_str("embedded"),
        }
    }
}

/// Metadata about a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// True if this is a directory.
    pub is_dir: bool,
    /// Size in bytes (0 for directories).
    pub len: u64,
}

impl Metadata {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        !self.is_dir
    }
}

/// A directory entry returned by [`ReadOnlyFs::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// True if the entry is a directory.
    pub is_dir: bool,
}

/// Read-only filesystem rooted at a directory.
///
/// All paths are relative to the handle's root; `""` and `"."` name the root
/// itself. If a handle is rooted at `assets`, then `read("css/site.css")`
/// reads `assets/css/site.css` from whichever source backs it.
pub trait ReadOnlyFs: Send + Sync + fmt::Debug {
    /// Reads the entire contents of a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if there is no file at `path`, and
    /// `Error::InvalidPath` if `path` is malformed.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Returns metadata for a file or directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if nothing exists at `path`.
    fn metadata(&self, path: &Path) -> Result<Metadata>;

    /// Lists a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the directory does not exist and
    /// `Error::NotADirectory` if `path` is a file.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Reports which backend serves this handle.
    fn source(&self) -> FsSource;

    /// Returns `true` if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Reads a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails like [`ReadOnlyFs::read`], or with `Error::InvalidData` if the
    /// content is not UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let data = self.read(path)?;
        String::from_utf8(data).map_err(|_| Error::InvalidData {
            path: path.display().to_string(),
        })
    }
}

impl<T: ReadOnlyFs + ?Sized> ReadOnlyFs for Box<T> {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read(path)
    }

    fn metadata(&self, path: &Path) -> Result<Metadata> {
        (**self).metadata(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn source(&self) -> FsSource {
        (**self).source()
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
