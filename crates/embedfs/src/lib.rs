//! Serve a directory of files from disk during development and from an
//! embedded tree in release binaries.
//!
//! The [`Selector`] inspects the path of the running executable. When it
//! points into a compile-and-run build cache, the live directory is served so
//! edits are visible immediately. Otherwise the tree bundled into the binary
//! is re-rooted at the same directory. Both backends implement [`ReadOnlyFs`],
//! so callers read `"index.html"` the same way regardless of where it came
//! from.
//!
//! # Features
//!
//! - **One capability, two backends**: [`DirFs`] for host directories,
//!   [`EmbeddedFs`] for bundled trees
//! - **Injectable self-identification**: swap the [`ExecutableLocator`] per
//!   selector instead of patching process-wide state
//! - **Classifiable errors**: [`Error::is_not_found`] separates missing
//!   content from every other fault
//! - **Thread-safe**: all types are `Send + Sync`
//! - **`include-dir` feature**: build an [`EmbeddedFs`] from
//!   `include_dir::Dir` without copying file contents
//!
//! # Examples
//!
//! ```
//! use embedfs::{EmbeddedFs, FixedExecutable, ReadOnlyFs, Selector};
//! use std::path::Path;
//!
//! let embedded = EmbeddedFs::builder()
//!     .add_file("foo/bar.txt", "hello".as_bytes())
//!     .add_file("foo/baz.txt", "world".as_bytes())
//!     .build()
//!     .unwrap();
//!
//! // A release binary: files come from the embedded tree.
//! let selector = Selector::with_locator(FixedExecutable::new("/usr/local/bin/myapp"));
//! let fsys = selector.select(Some(&embedded), "foo").unwrap();
//! assert_eq!(fsys.read(Path::new("bar.txt")).unwrap(), b"hello");
//!
//! // Missing directories are reported as not found.
//! let err = selector.select(Some(&embedded), "notfound").unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod embedded;
pub mod error;
pub mod fs;
pub mod live;
pub mod locator;
pub mod path;
pub mod select;

// Re-export main types
pub use builder::EmbeddedFsBuilder;
pub use embedded::EmbeddedFs;
pub use error::{Error, Result};
pub use fs::{DirEntry, FsSource, Metadata, ReadOnlyFs};
pub use live::DirFs;
pub use locator::{CurrentExe, ExecutableLocator, FixedExecutable};
pub use path::EmbedPath;
pub use select::{DEFAULT_DEV_MARKER, Selector, load};
