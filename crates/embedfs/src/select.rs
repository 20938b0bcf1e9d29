//! Choosing between the live directory and the embedded tree.
//!
//! When the running binary sits in a compile-and-run build cache, files are
//! served straight from disk so edits show up without a rebuild. Otherwise the
//! tree bundled into the binary is used. Either way the caller gets a
//! [`ReadOnlyFs`] rooted at the requested directory.
//!
//! Context detection looks for the development marker as a path segment
//! prefix in the executable path. A release binary installed under a
//! directory whose name starts with the marker is misclassified as a
//! development run.
//!
//! # Examples
//!
//! ```
//! use embedfs::{EmbeddedFs, FixedExecutable, FsSource, ReadOnlyFs, Selector};
//! use std::path::Path;
//!
//! let embedded = EmbeddedFs::builder()
//!     .add_file("foo/bar.txt", "hello".as_bytes())
//!     .build()
//!     .unwrap();
//!
//! let selector = Selector::with_locator(FixedExecutable::new("/usr/local/bin/myapp"));
//! let fsys = selector.select(Some(&embedded), "foo").unwrap();
//!
//! assert_eq!(fsys.source(), FsSource::Embedded);
//! assert_eq!(fsys.read_to_string(Path::new("bar.txt")).unwrap(), "hello");
//! ```

use crate::embedded::EmbeddedFs;
use crate::error::{Error, Result};
use crate::fs::{FsSource, ReadOnlyFs};
use crate::live::DirFs;
use crate::locator::{CurrentExe, ExecutableLocator};
use std::fmt;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path};

/// Path segment prefix that marks a compile-and-run build cache.
pub const DEFAULT_DEV_MARKER: &str = "go-build";

/// Picks the backing source for a directory of files.
///
/// A `Selector` holds no state besides its configuration, so one instance can
/// be shared across threads.
pub struct Selector {
    locator: Box<dyn ExecutableLocator>,
    dev_marker: String,
}

impl Selector {
    /// Creates a selector that asks the OS for the executable path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_locator(CurrentExe)
    }

    /// Creates a selector with a custom executable locator.
    #[must_use]
    pub fn with_locator(locator: impl ExecutableLocator + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            dev_marker: DEFAULT_DEV_MARKER.to_string(),
        }
    }

    /// Replaces the development marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::Selector;
    ///
    /// let selector = Selector::new().with_dev_marker("dev-cache");
    /// assert_eq!(selector.dev_marker(), "dev-cache");
    /// ```
    #[must_use]
    pub fn with_dev_marker(mut self, marker: impl Into<String>) -> Self {
        self.dev_marker = marker.into();
        self
    }

    /// Returns the development marker in use.
    #[must_use]
    pub fn dev_marker(&self) -> &str {
        &self.dev_marker
    }

    /// Returns `true` if `exe` looks like a binary produced by a
    /// compile-and-run workflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::Selector;
    /// use std::path::PathBuf;
    ///
    /// let selector = Selector::new();
    /// let dev: PathBuf = ["tmp", "go-build123", "b001", "exe", "app"].iter().collect();
    /// assert!(selector.is_dev_context(&dev));
    ///
    /// let release: PathBuf = ["usr", "local", "bin", "app"].iter().collect();
    /// assert!(!selector.is_dev_context(&release));
    /// ```
    #[must_use]
    pub fn is_dev_context(&self, exe: &Path) -> bool {
        let needle = format!("{MAIN_SEPARATOR}{}", self.dev_marker);
        exe.to_string_lossy().contains(&needle)
    }

    /// Returns a read-only filesystem rooted at `dir`.
    ///
    /// In a development run `dir` is a host path and the live directory is
    /// served. Otherwise `dir` is a path inside `embedded` and the embedded
    /// tree is re-rooted there. `embedded` is only consulted in the second
    /// case and may be `None` when the caller knows it will not be needed.
    ///
    /// # Errors
    ///
    /// - `Error::ExecutableResolution` if the locator fails; no filesystem is
    ///   touched in that case.
    /// - `Error::NotFound` if `dir` is missing from the selected source.
    /// - `Error::NotADirectory` if the host path `dir` is a file.
    /// - `Error::Subroot` if the embedded entry cannot be used as a root.
    /// - `Error::InvalidPath` if `dir` is not a valid embedded path.
    /// - `Error::Io` for any other host I/O failure.
    pub fn select(
        &self,
        embedded: Option<&EmbeddedFs>,
        dir: impl AsRef<Path>,
    ) -> Result<Box<dyn ReadOnlyFs>> {
        let dir = dir.as_ref();
        let exe = self
            .locator
            .current_exe()
            .map_err(|source| Error::ExecutableResolution { source })?;

        if self.is_dev_context(&exe) {
            let fsys = Self::live(dir)?;
            tracing::debug!(
                exe = %exe.display(),
                dir = %dir.display(),
                source = %FsSource::Live,
                "selected filesystem"
            );
            return Ok(Box::new(fsys));
        }

        let fsys = Self::embedded(embedded, dir)?;
        tracing::debug!(
            exe = %exe.display(),
            dir = %dir.display(),
            source = %FsSource::Embedded,
            "selected filesystem"
        );
        Ok(Box::new(fsys))
    }

    fn live(dir: &Path) -> Result<DirFs> {
        let meta = fs::metadata(dir).map_err(|e| Error::from_io(dir.display().to_string(), e))?;
        if !meta.is_dir() {
            return Err(Error::NotADirectory {
                path: dir.display().to_string(),
            });
        }
        Ok(DirFs::new(dir))
    }

    fn embedded(embedded: Option<&EmbeddedFs>, dir: &Path) -> Result<EmbeddedFs> {
        let Some(embedded) = embedded else {
            return Err(Error::NotFound {
                path: dir.display().to_string(),
                source: None,
            });
        };

        embedded.stat(dir)?;
        embedded.sub(dir).map_err(|e| Error::Subroot {
            dir: dir.display().to_string(),
            source: Box::new(e),
        })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("dev_marker", &self.dev_marker)
            .finish_non_exhaustive()
    }
}

/// Returns a filesystem rooted at `dir` using the OS executable path.
///
/// Shorthand for `Selector::new().select(Some(embedded), dir)`.
///
/// # Errors
///
/// See [`Selector::select`].
pub fn load(embedded: &EmbeddedFs, dir: impl AsRef<Path>) -> Result<Box<dyn ReadOnlyFs>> {
    Selector::new().select(Some(embedded), dir)
}
