#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathtree
//!
//! Platform-independent path algebra and recursive file-tree copy/delete.
//!
//! The crate has two halves. [`path`] works on path strings only: it splits
//! them into a root and components for a given [`Platform`], compares,
//! normalizes and joins them, and computes relative paths. [`fs`] mutates the
//! filesystem: a single-file copy primitive, a recursive copy whose failures
//! are steered by an [`ErrorPolicy`], and a best-effort recursive delete.
//!
//! ## Core Types
//!
//! - [`PathAlgebra`] and [`PathComponents`]: path operations and decomposed paths
//! - [`Platform`], [`UnixPlatform`], [`WindowsPlatform`]: path syntax
//! - [`Filesystem`] and [`StdFilesystem`]: the filesystem seam
//! - [`CopyOptions`], [`ErrorPolicy`], [`TreeWalkResult`]: tree copy control
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathtree::{PathAlgebra, UnixPlatform};
//!
//! let algebra = PathAlgebra::with_platform(UnixPlatform);
//! assert!(algebra.starts_with("/home/me/src", "/home"));
//! assert_eq!(algebra.normalize("/home/me/../you"), "/home/you");
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod path;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use fs::{
    copy_file, copy_recursively, delete_recursively, CollectErrors, CopyOptions, ErrorDecision,
    ErrorPolicy, Filesystem, Propagate, StdFilesystem, TreeWalkResult,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{
    DynPlatform, NativePlatform, PathAlgebra, PathComponents, Platform, PlatformKind,
    UnixPlatform, WindowsPlatform,
};
