//! The path algebra front end.
//!
//! [`PathAlgebra`] binds a [`Platform`] to the free functions of
//! [`relation`](crate::path::relation) and [`relative`](crate::path::relative)
//! so callers do not have to thread the platform through every call.

use crate::error::Result;
use crate::fs::Filesystem;
use crate::path::components::PathComponents;
use crate::path::platform::{DynPlatform, NativePlatform, Platform, PlatformKind};
use crate::path::{relation, relative};

/// Path operations for a fixed platform.
///
/// # Examples
///
/// ```
/// use pathtree::path::{PathAlgebra, UnixPlatform};
///
/// let algebra = PathAlgebra::with_platform(UnixPlatform);
///
/// assert!(algebra.starts_with("/usr/local/bin", "/usr"));
/// assert!(!algebra.starts_with("/usr2", "/usr"));
/// assert_eq!(algebra.normalize("/a/./b/../c"), "/a/c");
/// assert_eq!(algebra.resolve("/srv", "www/index.html"), "/srv/www/index.html");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAlgebra<P = NativePlatform> {
    platform: P,
}

impl PathAlgebra<NativePlatform> {
    /// Path algebra for the host platform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<PlatformKind> for PathAlgebra<DynPlatform> {
    fn from(kind: PlatformKind) -> Self {
        Self::with_platform(DynPlatform::from(kind))
    }
}

impl<P: Platform> PathAlgebra<P> {
    /// Path algebra for an explicit platform.
    #[must_use]
    pub fn with_platform(platform: P) -> Self {
        Self { platform }
    }

    /// The platform this algebra parses and renders with.
    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Split `path` into its root and segments.
    #[must_use]
    pub fn decompose(&self, path: &str) -> PathComponents {
        PathComponents::parse(path, &self.platform)
    }

    /// Whether `path` begins with the whole segments of `prefix`.
    #[must_use]
    pub fn starts_with(&self, path: &str, prefix: &str) -> bool {
        self.decompose(path).starts_with(&self.decompose(prefix))
    }

    /// Whether `path` ends with the whole segments of `suffix`.
    #[must_use]
    pub fn ends_with(&self, path: &str, suffix: &str) -> bool {
        self.decompose(path).ends_with(&self.decompose(suffix))
    }

    /// `path` with `.` dropped and `name/..` pairs cancelled.
    ///
    /// Leading `..` segments that have nothing to cancel are kept.
    #[must_use]
    pub fn normalize(&self, path: &str) -> String {
        self.decompose(path)
            .normalize()
            .to_path_string(&self.platform)
    }

    /// Join `relative` onto `base`.
    ///
    /// See [`relation::resolve`].
    #[must_use]
    pub fn resolve(&self, base: &str, relative: &str) -> String {
        relation::resolve(base, relative, &self.platform)
    }

    /// Join `relative` onto the parent of `path`.
    ///
    /// See [`relation::resolve_sibling`].
    #[must_use]
    pub fn resolve_sibling(&self, path: &str, relative: &str) -> String {
        relation::resolve_sibling(path, relative, &self.platform)
    }

    /// `path` relative to `base`, after canonicalizing both through `fs`.
    ///
    /// # Errors
    ///
    /// See [`relative::relative_to`].
    pub fn relative_to<F: Filesystem + ?Sized>(
        &self,
        fs: &F,
        path: &str,
        base: &str,
    ) -> Result<String> {
        relative::relative_to(fs, &self.platform, path, base)
    }

    /// Like [`relative_to`](Self::relative_to), but `None` for paths on
    /// different roots.
    ///
    /// # Errors
    ///
    /// Canonicalization failures are still reported.
    pub fn relative_to_or_none<F: Filesystem + ?Sized>(
        &self,
        fs: &F,
        path: &str,
        base: &str,
    ) -> Result<Option<String>> {
        relative::relative_to_or_none(fs, &self.platform, path, base)
    }

    /// Like [`relative_to`](Self::relative_to), but `path` itself for paths
    /// on different roots.
    ///
    /// # Errors
    ///
    /// Canonicalization failures are still reported.
    pub fn relative_to_or_self<F: Filesystem + ?Sized>(
        &self,
        fs: &F,
        path: &str,
        base: &str,
    ) -> Result<String> {
        relative::relative_to_or_self(fs, &self.platform, path, base)
    }
}
