//! Platform-aware path algebra.
//!
//! Paths are handled as strings and decomposed according to a [`Platform`]:
//! a root prefix (`/`, `C:\`, `\\server\share\`, or nothing for relative
//! paths) followed by name components. On top of that decomposition the
//! module offers prefix and suffix tests, lexical normalization, joining and
//! relative-path computation.
//!
//! # Key Concepts
//!
//! ## Decomposition
//!
//! Empty components and `.` are dropped while parsing. `..` is kept until
//! [`normalize`](PathAlgebra::normalize) cancels it against the component
//! before it.
//!
//! ## Relative paths
//!
//! [`relative_to`](PathAlgebra::relative_to) canonicalizes both paths through
//! a [`Filesystem`](crate::fs::Filesystem) before comparing them, so it needs
//! both to exist. [`relative::relative_between`] does the same computation
//! on strings that are already canonical.
//!
//! # Examples
//!
//! ```
//! use pathtree::path::{PathAlgebra, WindowsPlatform};
//!
//! let algebra = PathAlgebra::with_platform(WindowsPlatform);
//! assert!(algebra.starts_with("C:\\Users\\me\\docs", "C:/Users"));
//! assert!(!algebra.starts_with("D:\\Users", "C:\\Users"));
//! assert_eq!(algebra.resolve("C:\\Users", "me"), "C:\\Users\\me");
//! ```

mod algebra;
pub mod components;
pub mod platform;
pub mod relation;
pub mod relative;

use std::path::Path;

use crate::error::{Error, Result};

pub use algebra::PathAlgebra;
pub use components::{PathComponents, SegmentIter, Segments};
pub use platform::{
    DynPlatform, NativePlatform, Platform, PlatformKind, UnixPlatform, WindowsPlatform,
};

/// Borrow `path` as UTF-8, the form the path algebra works on.
pub(crate) fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".to_string(),
    })
}
