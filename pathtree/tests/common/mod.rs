//! Common test utilities for integration tests.
//!
//! Fixture builders for on-disk trees, a snapshot helper for comparing them,
//! and a filesystem wrapper that injects failures.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use pathtree::{Filesystem, StdFilesystem};
use tempfile::TempDir;

/// Builder for a directory tree inside a fresh temporary directory.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let fixture = TreeFixture::new()
///     .with_file("src/a.txt", "a")
///     .with_dir("src/empty")
///     .build();
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    files: Vec<(PathBuf, String)>,
    dirs: Vec<PathBuf>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Adds a file, creating its parent directories.
    pub fn with_file(mut self, relative: &str, contents: &str) -> Self {
        self.files.push((PathBuf::from(relative), contents.to_string()));
        self
    }

    /// Adds a directory.
    pub fn with_dir(mut self, relative: &str) -> Self {
        self.dirs.push(PathBuf::from(relative));
        self
    }

    /// Materializes the tree.
    pub fn build(self) -> TempDir {
        let temp = tempfile::tempdir().expect("create temp dir");
        for dir in &self.dirs {
            fs::create_dir_all(temp.path().join(dir)).expect("create dir");
        }
        for (file, contents) in &self.files {
            let path = temp.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent");
            }
            fs::write(path, contents).expect("write file");
        }
        temp
    }
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Every entry below `root`, keyed by relative path; directories map to
/// `None`, files to their contents.
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<String>> {
    let mut entries = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            let relative = path.strip_prefix(root).expect("under root").to_path_buf();
            if path.is_dir() {
                entries.insert(relative, None);
                pending.push(path);
            } else {
                entries.insert(relative, Some(fs::read_to_string(&path).expect("read file")));
            }
        }
    }
    entries
}

/// The host filesystem, except that removing any of the configured paths
/// fails with `PermissionDenied`.
#[allow(dead_code)]
pub struct UndeletableFs {
    locked: HashSet<PathBuf>,
}

#[allow(dead_code)]
impl UndeletableFs {
    /// Locks the given paths against removal.
    pub fn new<I: IntoIterator<Item = PathBuf>>(locked: I) -> Self {
        Self {
            locked: locked.into_iter().collect(),
        }
    }
}

impl Filesystem for UndeletableFs {
    fn exists(&self, path: &Path) -> bool {
        StdFilesystem.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        StdFilesystem.is_dir(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        StdFilesystem.is_symlink(path)
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        StdFilesystem.file_len(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        StdFilesystem.read_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        StdFilesystem.create_dir_all(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if self.locked.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
        }
        StdFilesystem.remove(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        StdFilesystem.canonicalize(path)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        StdFilesystem.open_read(path)
    }

    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        StdFilesystem.create_write(path)
    }
}
