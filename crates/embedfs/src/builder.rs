//! Builder pattern for constructing embedded trees.
//!
//! Provides a fluent API for assembling an [`EmbeddedFs`] from whatever
//! bundling mechanism produced the file contents.
//!
//! # Examples
//!
//! ```
//! use embedfs::EmbeddedFsBuilder;
//!
//! let fsys = EmbeddedFsBuilder::new()
//!     .add_file("templates/index.html", "<html></html>".as_bytes())
//!     .add_file("templates/base.html", "{% block body %}".as_bytes())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fsys.file_count(), 2);
//! ```

use crate::embedded::{EmbeddedFs, FileMap};
use crate::error::{Error, Result};
use crate::path::EmbedPath;
use std::borrow::Cow;
use std::path::Path;

/// Builder for an [`EmbeddedFs`].
///
/// Invalid paths do not abort the chain; errors are collected and the first
/// one is returned from [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use embedfs::EmbeddedFsBuilder;
///
/// let result = EmbeddedFsBuilder::new()
///     .add_file("ok.txt", "fine".as_bytes())
///     .add_file("/absolute.txt", "rejected".as_bytes())
///     .build();
///
/// assert!(result.unwrap_err().is_invalid_path());
/// ```
#[derive(Debug, Default)]
pub struct EmbeddedFsBuilder {
    files: FileMap,
    errors: Vec<Error>,
}

impl EmbeddedFsBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: FileMap::new(),
            errors: Vec::new(),
        }
    }

    /// Adds a file to the tree being built.
    ///
    /// If a file already exists at the path, it is replaced. Static byte
    /// slices are stored without copying.
    #[must_use]
    pub fn add_file(
        mut self,
        path: impl AsRef<Path>,
        content: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        match EmbedPath::new(path) {
            Ok(p) if p.is_root() => self.errors.push(Error::InvalidPath {
                path: ".".to_string(),
                reason: "the root cannot be a file",
            }),
            Ok(p) => {
                self.files.insert(p.as_str().to_string(), content.into());
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Adds multiple files to the tree being built.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::EmbeddedFsBuilder;
    ///
    /// let files = vec![
    ///     ("a.txt", "content1".as_bytes()),
    ///     ("b.txt", "content2".as_bytes()),
    /// ];
    ///
    /// let fsys = EmbeddedFsBuilder::new().add_files(files).build().unwrap();
    /// assert_eq!(fsys.file_count(), 2);
    /// ```
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<Cow<'static, [u8]>>,
    {
        for (path, content) in files {
            self = self.add_file(path, content);
        }
        self
    }

    /// Consumes the builder and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns the first path error encountered while adding files, or
    /// `Error::InvalidPath` if a file path is also used as a directory (for
    /// example both `a` and `a/b` were added).
    pub fn build(self) -> Result<EmbeddedFs> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        for key in self.files.keys() {
            let mut rest = key.as_str();
            while let Some((parent, _)) = rest.rsplit_once('/') {
                if self.files.contains_key(parent) {
                    return Err(Error::InvalidPath {
                        path: parent.to_string(),
                        reason: "file is also used as a directory",
                    });
                }
                rest = parent;
            }
        }

        tracing::trace!(files = self.files.len(), "built embedded filesystem");
        Ok(EmbeddedFs::from_files(self.files))
    }

    /// Returns the number of files currently in the builder.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let fsys = EmbeddedFsBuilder::new().build().unwrap();
        assert_eq!(fsys.file_count(), 0);
    }

    #[test]
    fn test_builder_default() {
        let fsys = EmbeddedFsBuilder::default().build().unwrap();
        assert_eq!(fsys.file_count(), 0);
    }

    #[test]
    fn test_add_file() {
        let fsys = EmbeddedFsBuilder::new()
            .add_file("test.txt", "content".as_bytes())
            .build()
            .unwrap();

        assert_eq!(fsys.file_count(), 1);
        assert_eq!(fsys.read_file("test.txt").unwrap(), b"content");
    }

    #[test]
    fn test_add_file_owned_content() {
        let fsys = EmbeddedFsBuilder::new()
            .add_file("owned.bin", vec![1u8, 2, 3])
            .build()
            .unwrap();

        assert_eq!(fsys.read_file("owned.bin").unwrap(), &[1u8, 2, 3]);
    }

    #[test]
    fn test_add_file_invalid_path() {
        let result = EmbeddedFsBuilder::new()
            .add_file("../escape", "content".as_bytes())
            .build();

        assert!(result.unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_add_file_at_root_rejected() {
        let result = EmbeddedFsBuilder::new()
            .add_file(".", "content".as_bytes())
            .build();

        assert!(result.unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_replace_file() {
        let fsys = EmbeddedFsBuilder::new()
            .add_file("test.txt", "original".as_bytes())
            .add_file("test.txt", "updated".as_bytes())
            .build()
            .unwrap();

        assert_eq!(fsys.read_file("test.txt").unwrap(), b"updated");
        assert_eq!(fsys.file_count(), 1);
    }

    #[test]
    fn test_file_shadowing_directory_rejected() {
        let result = EmbeddedFsBuilder::new()
            .add_file("a", "file".as_bytes())
            .add_file("a/b/c.txt", "nested".as_bytes())
            .build();

        let err = result.unwrap_err();
        assert!(err.is_invalid_path());
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_file_count() {
        let mut builder = EmbeddedFsBuilder::new();
        assert_eq!(builder.file_count(), 0);

        builder = builder.add_file("test1.txt", Vec::new());
        assert_eq!(builder.file_count(), 1);

        builder = builder.add_file("bad//path", Vec::new());
        assert_eq!(builder.file_count(), 1);
    }

    #[test]
    fn test_error_collection_returns_first() {
        let result = EmbeddedFsBuilder::new()
            .add_file("valid.txt", Vec::new())
            .add_file("/first", Vec::new())
            .add_file("second/", Vec::new())
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("/first"));
    }
}
