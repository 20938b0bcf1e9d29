//! Self-identification of the running executable.
//!
//! The selector asks a locator where the current binary lives. Production
//! code uses [`CurrentExe`]; tests and embedders that already know the
//! answer can inject [`FixedExecutable`] or a closure instead, without
//! touching any process-wide state.
//!
//! # Examples
//!
//! ```
//! use embedfs::{ExecutableLocator, FixedExecutable};
//!
//! let locator = FixedExecutable::new("/usr/local/bin/myapp");
//! assert_eq!(
//!     locator.current_exe().unwrap().to_str(),
//!     Some("/usr/local/bin/myapp")
//! );
//! ```

use std::io;
use std::path::PathBuf;

/// Reports the path of the currently running executable.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableLocator: Send + Sync {
    /// Returns the absolute path of the running binary.
    ///
    /// # Errors
    ///
    /// Returns the platform error if the path cannot be determined, for
    /// example under sandboxing restrictions.
    fn current_exe(&self) -> io::Result<PathBuf>;
}

/// Locator backed by [`std::env::current_exe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentExe;

impl ExecutableLocator for CurrentExe {
    fn current_exe(&self) -> io::Result<PathBuf> {
        std::env::current_exe()
    }
}

/// Locator that always reports the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedExecutable(PathBuf);

impl FixedExecutable {
    /// Creates a locator that reports `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl ExecutableLocator for FixedExecutable {
    fn current_exe(&self) -> io::Result<PathBuf> {
        Ok(self.0.clone())
    }
}

impl<F> ExecutableLocator for F
where
    F: Fn() -> io::Result<PathBuf> + Send + Sync,
{
    fn current_exe(&self) -> io::Result<PathBuf> {
        self()
    }
}
