//! File-tree operations.
//!
//! This module provides the mutating half of the crate: a single-file copy
//! primitive, a recursive tree copy steered by an [`ErrorPolicy`], and a
//! best-effort recursive delete. All filesystem access goes through the
//! [`Filesystem`] trait so every engine can run against a fake in tests.
//!
//! # Examples
//!
//! ```no_run
//! use pathtree::fs::{copy_recursively, delete_recursively, CopyOptions, Propagate, StdFilesystem};
//! use std::path::Path;
//!
//! let fs = StdFilesystem;
//! let outcome = copy_recursively(
//!     &fs,
//!     Path::new("assets"),
//!     Path::new("build/assets"),
//!     &CopyOptions::default(),
//!     &mut Propagate,
//! )
//! .unwrap();
//! assert!(outcome.is_completed());
//!
//! assert!(delete_recursively(&fs, Path::new("build")));
//! ```

pub mod copy;
pub mod policy;
mod std_fs;
pub mod tree;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub use copy::{copy_file, CopyOptions, DEFAULT_BUFFER_SIZE};
pub use policy::{CollectErrors, ErrorDecision, ErrorPolicy, Propagate};
pub use std_fs::StdFilesystem;
pub use tree::{copy_recursively, delete_recursively, TreeWalkResult};

/// The filesystem capabilities the engines rely on.
///
/// Implementations decide what "exists" and "is a directory" mean for their
/// backing store; the engines only ever call through this trait.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` itself is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Length in bytes of the file at `path`.
    fn file_len(&self, path: &Path) -> io::Result<u64>;

    /// The entries of directory `path`.
    ///
    /// An unreadable directory is an error, never an empty list.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create `path` and any missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file, a symlink or an empty directory.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Absolute, symlink-free form of `path`.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Open `path` for reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Create (or truncate) `path` for writing.
    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}
