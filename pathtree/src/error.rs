//! Error types for the pathtree library.
//!
//! This module provides the error taxonomy shared by the path algebra, the
//! single-file copy primitive and the tree engines, using `thiserror` for
//! ergonomic error handling.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for operations that may fail with a pathtree error.
///
/// # Examples
///
/// ```
/// use pathtree::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathtree library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path that was required to exist does not.
    #[error("no such file or directory: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A file was expected but a directory was found.
    #[error("is a directory: {}", path.display())]
    IsDirectory {
        /// The offending directory.
        path: PathBuf,
    },

    /// The destination of a copy already exists.
    #[error("file already exists: {}{}", path.display(), other.as_ref().map(|o| format!(" (while copying {})", o.display())).unwrap_or_default())]
    AlreadyExists {
        /// The destination that already exists.
        path: PathBuf,
        /// The source being copied onto it, when known.
        other: Option<PathBuf>,
    },

    /// A directory that had to be replaced still has entries.
    #[error("directory not empty: {}", path.display())]
    DirectoryNotEmpty {
        /// The non-empty directory.
        path: PathBuf,
    },

    /// Access to a path was refused, or its entries could not be listed.
    #[error("access denied: {}", path.display())]
    AccessDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A copied file does not have the length of its source.
    #[error("source file wasn't copied completely: {} has {expected} bytes, copied {actual}", path.display())]
    LengthMismatch {
        /// The source file.
        path: PathBuf,
        /// Length of the source file.
        expected: u64,
        /// Number of bytes written to the destination.
        actual: u64,
    },

    /// An argument cannot be used for the requested operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// A path cannot be handled by the string-based path algebra.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// Fieldless classification of an [`Error`].
///
/// Error policies usually only care about the category of a failure, so this
/// mirror of the taxonomy can be matched without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::NotFound`].
    NotFound,
    /// See [`Error::IsDirectory`].
    IsDirectory,
    /// See [`Error::AlreadyExists`].
    AlreadyExists,
    /// See [`Error::DirectoryNotEmpty`].
    DirectoryNotEmpty,
    /// See [`Error::AccessDenied`].
    AccessDenied,
    /// Generic I/O failures, including [`Error::LengthMismatch`].
    IoFailure,
    /// See [`Error::InvalidArgument`] and [`Error::InvalidPath`].
    InvalidArgument,
    /// Configuration parsing and validation failures.
    Configuration,
}

impl Error {
    /// Classify an I/O error raised while operating on `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::Error;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
    /// let err = Error::from_io(Path::new("/missing"), io_err);
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path, other: None },
            io::ErrorKind::DirectoryNotEmpty => Self::DirectoryNotEmpty { path },
            io::ErrorKind::IsADirectory => Self::IsDirectory { path },
            _ => Self::Io(err),
        }
    }

    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::IsDirectory { .. } => ErrorKind::IsDirectory,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::DirectoryNotEmpty { .. } => ErrorKind::DirectoryNotEmpty,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::Io(_) | Self::LengthMismatch { .. } => ErrorKind::IoFailure,
            Self::InvalidArgument { .. } | Self::InvalidPath { .. } => ErrorKind::InvalidArgument,
            Self::Configuration(_) | Self::Validation { .. } => ErrorKind::Configuration,
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error reports an already existing destination.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::AccessDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_access_denied());
    /// ```
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Check if error is a generic I/O failure or a length mismatch.
    #[must_use]
    pub fn is_io_failure(&self) -> bool {
        self.kind() == ErrorKind::IoFailure
    }
}
