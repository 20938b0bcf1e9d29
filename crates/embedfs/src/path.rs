//! Validated paths for the embedded tree.
//!
//! Embedded paths are platform independent: they are always relative and
//! slash separated, so a tree bundled on one host resolves identically on
//! another.
//!
//! # Examples
//!
//! ```
//! use embedfs::EmbedPath;
//!
//! let path = EmbedPath::new("static/css/site.css").unwrap();
//! assert_eq!(path.as_str(), "static/css/site.css");
//! assert_eq!(path.parent().unwrap().as_str(), "static/css");
//!
//! assert!(EmbedPath::new("/absolute").is_err());
//! assert!(EmbedPath::new("static/../escape").is_err());
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// A validated, slash-separated relative path inside an embedded tree.
///
/// Rules:
/// - no leading or trailing '/'
/// - no empty, '.' or '..' elements, except that "." alone names the root
/// - no '\' anywhere
///
/// The root is stored as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmbedPath(String);

impl EmbedPath {
    /// Creates a new `EmbedPath`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if the path is empty, absolute, not
    /// UTF-8, or contains a backslash, an empty element, '.' or '..'.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::EmbedPath;
    ///
    /// let root = EmbedPath::new(".")?;
    /// assert!(root.is_root());
    ///
    /// let file = EmbedPath::new("foo/bar.txt")?;
    /// assert_eq!(file.file_name(), Some("bar.txt"));
    /// # Ok::<(), embedfs::Error>(())
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
            path: path.display().to_string(),
            reason: "not valid UTF-8",
        })?;

        let invalid = |reason| Error::InvalidPath {
            path: path_str.to_string(),
            reason,
        };

        if path_str.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path_str == "." {
            return Ok(Self::root());
        }
        if path_str.contains('\\') {
            return Err(invalid("backslash is not a separator"));
        }
        if path_str.starts_with('/') {
            return Err(invalid("path must be relative"));
        }

        for element in path_str.split('/') {
            match element {
                "" => return Err(invalid("empty path element")),
                "." | ".." => return Err(invalid("dot elements are not allowed")),
                _ => {}
            }
        }

        Ok(Self(path_str.to_string()))
    }

    /// Returns the root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` if this is the root of the tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a string slice.
    ///
    /// The root is returned as `""`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last element of the path, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        Some(self.0.rsplit('/').next().unwrap_or(&self.0))
    }

    /// Returns the parent directory of this path.
    ///
    /// Returns `None` if this is the root path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(
            self.0
                .rfind('/')
                .map_or_else(Self::root, |pos| Self(self.0[..pos].to_string())),
        )
    }

    /// Appends `other` to this path.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        match (self.is_root(), other.is_root()) {
            (true, _) => other.clone(),
            (false, true) => self.clone(),
            (false, false) => Self(format!("{}/{}", self.0, other.0)),
        }
    }

    /// Returns this path relative to `base`, if `base` is an ancestor.
    ///
    /// A path is its own ancestor; the result is then the root.
    #[must_use]
    pub fn strip_prefix(&self, base: &Self) -> Option<Self> {
        if base.is_root() {
            return Some(self.clone());
        }
        if self.0 == base.0 {
            return Some(Self::root());
        }
        self.0
            .strip_prefix(base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| Self(rest.to_string()))
    }
}

impl fmt::Display for EmbedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl AsRef<str> for EmbedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
