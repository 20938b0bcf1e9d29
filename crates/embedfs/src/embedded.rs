//! Embedded filesystem implementation.
//!
//! An immutable path-to-bytes tree, usually bundled into the binary at build
//! time. Directories are implied by the files beneath them. Re-rooting a tree
//! with [`EmbeddedFs::sub`] shares the underlying storage, so handles are
//! cheap to clone and narrow.
//!
//! # Examples
//!
//! ```
//! use embedfs::EmbeddedFs;
//!
//! let fsys = EmbeddedFs::builder()
//!     .add_file("foo/bar.txt", "hello".as_bytes())
//!     .add_file("foo/baz.txt", "world".as_bytes())
//!     .build()
//!     .unwrap();
//!
//! let foo = fsys.sub("foo").unwrap();
//! assert_eq!(foo.read_file("bar.txt").unwrap(), b"hello");
//! assert!(foo.exists("baz.txt"));
//! ```

use crate::builder::EmbeddedFsBuilder;
use crate::error::{Error, Result};
use crate::fs::{DirEntry, FsSource, Metadata, ReadOnlyFs};
use crate::path::EmbedPath;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::ops::Bound;
use std::path::Path;
use std::sync::Arc;

pub(crate) type FileMap = BTreeMap<String, Cow<'static, [u8]>>;

/// What a resolved path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node<'a> {
    File(&'a [u8]),
    Dir,
}

/// A read-only, in-memory filesystem tree.
///
/// Paths follow [`EmbedPath`] rules. The tree itself never changes after
/// construction; `EmbeddedFs` values are views of it rooted at some
/// directory.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, and cloning it only bumps a reference
/// count.
#[derive(Clone)]
pub struct EmbeddedFs {
    files: Arc<FileMap>,
    root: EmbedPath,
}

impl EmbeddedFs {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::EmbeddedFs;
    ///
    /// let fsys = EmbeddedFs::new();
    /// assert_eq!(fsys.file_count(), 0);
    /// assert!(fsys.exists("."));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_files(FileMap::new())
    }

    /// Returns a builder for populating a tree.
    #[must_use]
    pub fn builder() -> EmbeddedFsBuilder {
        EmbeddedFsBuilder::new()
    }

    pub(crate) fn from_files(files: FileMap) -> Self {
        Self {
            files: Arc::new(files),
            root: EmbedPath::root(),
        }
    }

    /// Builds a tree from a directory bundled with `include_dir!`.
    ///
    /// File contents are borrowed from the binary, not copied. Empty
    /// directories are not represented.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if a bundled path is not valid UTF-8.
    #[cfg(feature = "include-dir")]
    pub fn from_include_dir(dir: &include_dir::Dir<'static>) -> Result<Self> {
        fn collect(
            dir: &include_dir::Dir<'static>,
            mut builder: EmbeddedFsBuilder,
        ) -> Result<EmbeddedFsBuilder> {
            for entry in dir.entries() {
                match entry {
                    include_dir::DirEntry::Dir(sub) => builder = collect(sub, builder)?,
                    include_dir::DirEntry::File(file) => {
                        let path = file.path().to_str().ok_or_else(|| Error::InvalidPath {
                            path: file.path().display().to_string(),
                            reason: "not valid UTF-8",
                        })?;
                        builder = builder.add_file(path.replace('\\', "/"), file.contents());
                    }
                }
            }
            Ok(builder)
        }

        collect(dir, EmbeddedFsBuilder::new())?.build()
    }

    /// Returns the directory this view is rooted at, relative to the top of
    /// the tree.
    #[must_use]
    pub const fn root(&self) -> &EmbedPath {
        &self.root
    }

    /// Returns the number of files visible below this view's root.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files_below(&self.root).count()
    }

    /// Returns all file paths below this view's root, relative to it, in
    /// sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::EmbeddedFs;
    ///
    /// let fsys = EmbeddedFs::builder()
    ///     .add_file("web/b.css", Vec::new())
    ///     .add_file("web/a.html", Vec::new())
    ///     .add_file("other.txt", Vec::new())
    ///     .build()
    ///     .unwrap();
    ///
    /// let web = fsys.sub("web").unwrap();
    /// assert_eq!(web.paths(), vec!["a.html", "b.css"]);
    /// ```
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files_below(&self.root)
            .map(|(key, _)| Self::relative(key, &self.root).to_string())
            .collect()
    }

    /// Returns metadata for `path`, relative to this view's root.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if there is no such entry, and
    /// `Error::InvalidPath` if `path` is malformed.
    pub fn stat(&self, path: impl AsRef<Path>) -> Result<Metadata> {
        let full = self.resolve(path.as_ref())?;
        match self.node(&full) {
            Some(Node::File(data)) => Ok(Metadata {
                is_dir: false,
                len: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(Metadata {
                is_dir: true,
                len: 0,
            }),
            None => Err(self.not_found(&full)),
        }
    }

    /// Returns `true` if a file or directory exists at `path`.
    ///
    /// Returns `false` if the path is invalid.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.stat(path).is_ok()
    }

    /// Reads a file's bytes without copying them.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the file does not exist, `Error::Io`
    /// with kind `IsADirectory` if `path` is a directory, and
    /// `Error::InvalidPath` if `path` is malformed.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&[u8]> {
        let full = self.resolve(path.as_ref())?;
        match self.node(&full) {
            Some(Node::File(data)) => Ok(data),
            Some(Node::Dir) => Err(Error::Io {
                path: full.to_string(),
                source: io::Error::from(io::ErrorKind::IsADirectory),
            }),
            None => Err(self.not_found(&full)),
        }
    }

    /// Returns a view of this tree rooted at `dir`.
    ///
    /// Paths given to the new view are relative to `dir`. `sub(".")` returns
    /// an equivalent view.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `dir` does not exist,
    /// `Error::NotADirectory` if it is a file, and `Error::InvalidPath` if it
    /// is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs::EmbeddedFs;
    ///
    /// let fsys = EmbeddedFs::builder()
    ///     .add_file("a/b/c.txt", "c".as_bytes())
    ///     .build()
    ///     .unwrap();
    ///
    /// let b = fsys.sub("a").unwrap().sub("b").unwrap();
    /// assert_eq!(b.read_file("c.txt").unwrap(), b"c");
    /// assert!(fsys.sub("a/b/c.txt").unwrap_err().is_not_directory());
    /// ```
    pub fn sub(&self, dir: impl AsRef<Path>) -> Result<Self> {
        let full = self.resolve(dir.as_ref())?;
        match self.node(&full) {
            Some(Node::Dir) => Ok(Self {
                files: Arc::clone(&self.files),
                root: full,
            }),
            Some(Node::File(_)) => Err(Error::NotADirectory {
                path: full.to_string(),
            }),
            None => Err(self.not_found(&full)),
        }
    }

    /// Lists the direct children of `dir`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `dir` does not exist and
    /// `Error::NotADirectory` if it is a file.
    pub fn list_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<DirEntry>> {
        let full = self.resolve(dir.as_ref())?;
        match self.node(&full) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(Error::NotADirectory {
                    path: full.to_string(),
                });
            }
            None => return Err(self.not_found(&full)),
        }

        let mut entries: Vec<DirEntry> = Vec::new();
        for (key, _) in self.files_below(&full) {
            let rest = Self::relative(key, &full);
            let (name, is_dir) = rest.split_once('/').map_or((rest, false), |(n, _)| (n, true));
            // Keys are sorted, so a repeated directory name is always the last entry.
            if entries.last().is_some_and(|last| last.name == name) {
                continue;
            }
            entries.push(DirEntry {
                name: name.to_string(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Resolves a caller path against this view's root.
    fn resolve(&self, path: &Path) -> Result<EmbedPath> {
        if path.as_os_str().is_empty() {
            return Ok(self.root.clone());
        }
        Ok(self.root.join(&EmbedPath::new(path)?))
    }

    fn node(&self, full: &EmbedPath) -> Option<Node<'_>> {
        if full.is_root() {
            return Some(Node::Dir);
        }
        if let Some(data) = self.files.get(full.as_str()) {
            return Some(Node::File(&**data));
        }
        self.files_below(full).next().map(|_| Node::Dir)
    }

    /// Iterates over every file strictly below `dir`, in key order.
    fn files_below<'a>(
        &'a self,
        dir: &EmbedPath,
    ) -> impl Iterator<Item = (&'a String, &'a Cow<'static, [u8]>)> + use<'a> {
        let prefix = if dir.is_root() {
            String::new()
        } else {
            format!("{}/", dir.as_str())
        };
        self.files
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(&prefix))
    }

    /// Strips `dir` and the following separator from a key known to be below it.
    fn relative<'k>(key: &'k str, dir: &EmbedPath) -> &'k str {
        if dir.is_root() {
            key
        } else {
            &key[dir.as_str().len() + 1..]
        }
    }

    fn not_found(&self, full: &EmbedPath) -> Error {
        let shown = full.strip_prefix(&self.root).unwrap_or_else(|| full.clone());
        Error::NotFound {
            path: shown.to_string(),
            source: None,
        }
    }
}

impl Default for EmbeddedFs {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmbeddedFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedFs")
            .field("root", &self.root.to_string())
            .field("files", &self.file_count())
            .finish()
    }
}

impl ReadOnlyFs for EmbeddedFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_file(path).map(<[u8]>::to_vec)
    }

    fn metadata(&self, path: &Path) -> Result<Metadata> {
        self.stat(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        self.list_dir(path)
    }

    fn source(&self) -> FsSource {
        FsSource::Embedded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmbeddedFs {
        EmbeddedFs::builder()
            .add_file("foo/bar.txt", "hello".as_bytes())
            .add_file("foo/baz.txt", "world".as_bytes())
            .add_file("foo/nested/deep.txt", "deep".as_bytes())
            .add_file("foobar.txt", "sibling".as_bytes())
            .add_file("top.txt", "top".as_bytes())
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let fsys = EmbeddedFs::new();
        assert_eq!(fsys.file_count(), 0);
        assert!(fsys.root().is_root());
    }

    #[test]
    fn test_root_always_exists() {
        let fsys = EmbeddedFs::new();
        assert!(fsys.stat(".").unwrap().is_dir);
        assert!(fsys.stat("").unwrap().is_dir);
    }

    #[test]
    fn test_stat_file_and_dir() {
        let fsys = sample();
        let file = fsys.stat("foo/bar.txt").unwrap();
        assert!(file.is_file());
        assert_eq!(file.len, 5);

        let dir = fsys.stat("foo/nested").unwrap();
        assert!(dir.is_dir);
    }

    #[test]
    fn test_stat_missing() {
        let fsys = sample();
        assert!(fsys.stat("notfound").unwrap_err().is_not_found());
        // A prefix of a name is not a directory
        assert!(fsys.stat("fo").unwrap_err().is_not_found());
    }

    #[test]
    fn test_stat_invalid_path() {
        let fsys = sample();
        assert!(fsys.stat("/foo").unwrap_err().is_invalid_path());
        assert!(fsys.stat("foo/../top.txt").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_read_file() {
        let fsys = sample();
        assert_eq!(fsys.read_file("foo/bar.txt").unwrap(), b"hello");
        assert!(fsys.read_file("foo/missing.txt").unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_file_on_directory() {
        let fsys = sample();
        let err = fsys.read_file("foo").unwrap_err();
        assert!(matches!(
            err,
            Error::Io { ref source, .. } if source.kind() == io::ErrorKind::IsADirectory
        ));
    }

    #[test]
    fn test_sub_rebases_paths() {
        let foo = sample().sub("foo").unwrap();
        assert_eq!(foo.root().as_str(), "foo");
        assert_eq!(foo.read_file("bar.txt").unwrap(), b"hello");
        assert_eq!(foo.read_file("nested/deep.txt").unwrap(), b"deep");
        assert!(!foo.exists("top.txt"));
        assert!(!foo.exists("foo/bar.txt"));
        assert_eq!(foo.file_count(), 3);
    }

    #[test]
    fn test_sub_does_not_leak_siblings() {
        let foo = sample().sub("foo").unwrap();
        assert!(!foo.paths().iter().any(|p| p.contains("foobar")));
    }

    #[test]
    fn test_sub_composes() {
        let fsys = sample();
        let twice = fsys.sub("foo").unwrap().sub("nested").unwrap();
        let once = fsys.sub("foo/nested").unwrap();
        assert_eq!(twice.root(), once.root());
        assert_eq!(twice.paths(), once.paths());
    }

    #[test]
    fn test_sub_dot_is_identity() {
        let foo = sample().sub("foo").unwrap();
        let same = foo.sub(".").unwrap();
        assert_eq!(same.root(), foo.root());
    }

    #[test]
    fn test_sub_errors() {
        let fsys = sample();
        assert!(fsys.sub("notfound").unwrap_err().is_not_found());
        assert!(fsys.sub("foo/bar.txt").unwrap_err().is_not_directory());
    }

    #[test]
    fn test_not_found_path_is_relative_to_view() {
        let foo = sample().sub("foo").unwrap();
        let err = foo.read_file("nope.txt").unwrap_err();
        assert_eq!(err.to_string(), "File not found: nope.txt");
    }

    #[test]
    fn test_list_dir() {
        let fsys = sample();
        let entries = fsys.list_dir("foo").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bar.txt", "baz.txt", "nested"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn test_list_dir_root() {
        let fsys = sample();
        let names: Vec<_> = fsys
            .list_dir(".")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["foo", "foobar.txt", "top.txt"]);
    }

    #[test]
    fn test_list_dir_errors() {
        let fsys = sample();
        assert!(fsys.list_dir("missing").unwrap_err().is_not_found());
        assert!(fsys.list_dir("top.txt").unwrap_err().is_not_directory());
    }

    #[test]
    fn test_read_only_fs_impl() {
        let foo = sample().sub("foo").unwrap();
        let handle: &dyn ReadOnlyFs = &foo;
        assert_eq!(handle.source(), FsSource::Embedded);
        assert_eq!(handle.read_to_string(Path::new("baz.txt")).unwrap(), "world");
        assert!(handle.exists(Path::new("nested")));
    }

    #[test]
    fn test_read_to_string_invalid_utf8() {
        let fsys = EmbeddedFs::builder()
            .add_file("bin.dat", vec![0xff, 0xfe])
            .build()
            .unwrap();
        let err = fsys.read_to_string(Path::new("bin.dat")).unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
    }

    #[test]
    fn test_embedded_fs_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<EmbeddedFs>();
        assert_sync::<EmbeddedFs>();
    }
}
