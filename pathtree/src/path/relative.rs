//! Relative paths between two locations.
//!
//! Both paths are canonicalized through the [`Filesystem`] first, then the
//! relation is worked out on the canonical strings: the longest common
//! prefix is found character by character and snapped back to a separator
//! boundary, whatever remains of the base becomes a run of `..`, and whatever
//! remains of the path is appended.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::Filesystem;
use crate::path::components::PathComponents;
use crate::path::platform::Platform;

/// Compute `path` relative to `base`.
///
/// # Errors
///
/// - [`Error::Io`] if either path cannot be canonicalized
/// - [`Error::InvalidPath`] if a canonical path is not valid UTF-8
/// - [`Error::InvalidArgument`] if the canonical paths have different roots
pub fn relative_to<F, P>(fs: &F, platform: &P, path: &str, base: &str) -> Result<String>
where
    F: Filesystem + ?Sized,
    P: Platform + ?Sized,
{
    let canonical_path = canonical_string(fs, path)?;
    let canonical_base = canonical_string(fs, base)?;
    relative_between(&canonical_path, &canonical_base, platform)
}

/// Like [`relative_to`], but `None` when the paths have different roots.
///
/// # Errors
///
/// Canonicalization failures are still reported.
pub fn relative_to_or_none<F, P>(
    fs: &F,
    platform: &P,
    path: &str,
    base: &str,
) -> Result<Option<String>>
where
    F: Filesystem + ?Sized,
    P: Platform + ?Sized,
{
    match relative_to(fs, platform, path, base) {
        Ok(relative) => Ok(Some(relative)),
        Err(Error::InvalidArgument { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Like [`relative_to`], but falls back to `path` itself when the paths have
/// different roots.
///
/// # Errors
///
/// Canonicalization failures are still reported.
pub fn relative_to_or_self<F, P>(fs: &F, platform: &P, path: &str, base: &str) -> Result<String>
where
    F: Filesystem + ?Sized,
    P: Platform + ?Sized,
{
    Ok(relative_to_or_none(fs, platform, path, base)?.unwrap_or_else(|| path.to_string()))
}

/// Relative path between two already canonical path strings.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the roots differ.
///
/// # Examples
///
/// ```
/// use pathtree::path::{relative::relative_between, UnixPlatform};
///
/// assert_eq!(relative_between("/a/b/c", "/a/b", &UnixPlatform).unwrap(), "c");
/// assert_eq!(relative_between("/a/b/c", "/a/x", &UnixPlatform).unwrap(), "../b/c");
/// assert_eq!(relative_between("/a/b", "/a/b", &UnixPlatform).unwrap(), "");
/// ```
pub fn relative_between<P: Platform + ?Sized>(
    path: &str,
    base: &str,
    platform: &P,
) -> Result<String> {
    if path == base {
        return Ok(String::new());
    }

    let path_root = PathComponents::parse(path, platform);
    let base_root = PathComponents::parse(base, platform);
    if path_root.root() != base_root.root() {
        return Err(Error::InvalidArgument {
            reason: format!("'{path}' and '{base}' have different roots"),
        });
    }

    let is_sep = |c: char| platform.is_separator(c);
    let common = snap_to_boundary(path, base, common_prefix_len(path, base), platform);
    let path_rest = path[common..].trim_start_matches(is_sep);
    let base_rest = base[common..].trim_start_matches(is_sep);

    let mut relative = String::new();
    let ascents = base_rest.split(is_sep).filter(|s| !s.is_empty()).count();
    for i in 0..ascents {
        if i > 0 {
            relative.push(platform.separator());
        }
        relative.push_str("..");
    }
    if !path_rest.is_empty() {
        if !relative.is_empty() {
            relative.push(platform.separator());
        }
        relative.push_str(path_rest);
    }
    Ok(relative)
}

/// Byte length of the longest common prefix, always on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}

/// Trim a common prefix that ends in the middle of a component back to the
/// last separator inside it.
fn snap_to_boundary<P: Platform + ?Sized>(a: &str, b: &str, len: usize, platform: &P) -> usize {
    let is_sep = |c: char| platform.is_separator(c);
    let on_boundary = |s: &str| {
        len == s.len() || s[len..].starts_with(is_sep) || s[..len].ends_with(is_sep)
    };
    if on_boundary(a) && on_boundary(b) {
        return len;
    }
    a[..len].rfind(is_sep).map_or(0, |i| i + 1)
}

fn canonical_string<F: Filesystem + ?Sized>(fs: &F, path: &str) -> Result<String> {
    let canonical = fs.canonicalize(Path::new(path))?;
    canonical
        .into_os_string()
        .into_string()
        .map_err(|os| Error::InvalidPath {
            path: PathBuf::from(os),
            reason: "Path contains invalid UTF-8".to_string(),
        })
}
