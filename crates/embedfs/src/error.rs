//! Error types for filesystem selection and access.
//!
//! A single error enum covers both the selection step and reads through the
//! returned handle, so callers can branch on one type regardless of which
//! backend served them.
//!
//! # Examples
//!
//! ```
//! use embedfs::Error;
//!
//! let error = Error::NotFound {
//!     path: "assets".to_string(),
//!     source: None,
//! };
//!
//! assert!(error.is_not_found());
//! assert!(!error.is_subroot());
//! ```

use std::io;
use thiserror::Error;

/// Errors produced while selecting or reading a filesystem.
///
/// All variants carry the path they relate to and implement `is_xxx()`
/// methods for classification.
#[derive(Error, Debug)]
pub enum Error {
    /// The path of the running executable could not be determined.
    ///
    /// Treated as fatal by convention; retrying does not help.
    #[error("Cannot resolve current executable: {source}")]
    ExecutableResolution {
        /// Error reported by the executable locator
        #[source]
        source: io::Error,
    },

    /// File or directory not found at the specified path
    #[error("File not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
        /// Host error, when the lookup went to disk
        #[source]
        source: Option<io::Error>,
    },

    /// Path exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory
        path: String,
    },

    /// An embedded entry exists but cannot be used as a filesystem root.
    #[error("Cannot use '{dir}' as embedded root: {source}")]
    Subroot {
        /// The directory that was requested as the new root
        dir: String,
        /// Why re-rooting failed
        #[source]
        source: Box<Error>,
    },

    /// Path is invalid or malformed
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path
        path: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// File content was requested as text but is not valid UTF-8
    #[error("File is not valid UTF-8: {path}")]
    InvalidData {
        /// The file that failed to decode
        path: String,
    },

    /// Any other host I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being accessed
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Builds an error from a host I/O failure, keeping not-found distinct.
    pub(crate) fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path,
                source: Some(source),
            }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns `true` if the requested file or directory does not exist.
    ///
    /// This is the check callers use to tell missing content apart from
    /// every other fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::Error;
    ///
    /// let error = Error::NotFound {
    ///     path: "missing".to_string(),
    ///     source: None,
    /// };
    ///
    /// assert!(error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if the executable path could not be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::Error;
    /// use std::io;
    ///
    /// let error = Error::ExecutableResolution {
    ///     source: io::Error::other("sandboxed"),
    /// };
    ///
    /// assert!(error.is_executable_resolution());
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_executable_resolution(&self) -> bool {
        matches!(self, Self::ExecutableResolution { .. })
    }

    /// Returns `true` if an embedded entry could not be used as a root.
    #[must_use]
    pub const fn is_subroot(&self) -> bool {
        matches!(self, Self::Subroot { .. })
    }

    /// Returns `true` if this is an invalid path error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::NotFound { .. } => io::ErrorKind::NotFound,
            Error::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            Error::InvalidPath { .. } | Error::Subroot { .. } => io::ErrorKind::InvalidInput,
            Error::InvalidData { .. } => io::ErrorKind::InvalidData,
            Error::Io { source, .. } | Error::ExecutableResolution { source } => source.kind(),
        };
        Self::new(kind, error)
    }
}

/// Type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
