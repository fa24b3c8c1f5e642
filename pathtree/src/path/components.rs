//! Path decomposition into a root and name components.
//!
//! A path string is scanned once from left to right: the platform's root
//! prefix is peeled off first, then the remainder is split on separators.
//! Empty components (doubled or trailing separators) and `.` components are
//! dropped during the scan, so a decomposed path never contains them.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::path::platform::Platform;

/// A path decomposed into its root and an ordered list of components.
///
/// The root is empty exactly for relative paths. Two `PathComponents` are
/// equal when their roots and components are equal; there is no case folding.
///
/// # Examples
///
/// ```
/// use pathtree::path::{PathComponents, UnixPlatform, WindowsPlatform};
///
/// let unix = PathComponents::parse("/usr/./local//bin/", &UnixPlatform);
/// assert_eq!(unix.root(), "/");
/// assert_eq!(unix.segments().collect::<Vec<_>>(), ["usr", "local", "bin"]);
///
/// let windows = PathComponents::parse("C:/Users\\me", &WindowsPlatform);
/// assert_eq!(windows.root(), "C:\\");
/// assert_eq!(windows.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathComponents {
    root: String,
    segments: Vec<String>,
}

impl PathComponents {
    /// Decompose `path` according to `platform`'s syntax.
    #[must_use]
    pub fn parse<P: Platform + ?Sized>(path: &str, platform: &P) -> Self {
        let root_len = root_length(path, platform);
        let root = path[..root_len]
            .chars()
            .map(|c| {
                if platform.is_separator(c) {
                    platform.separator()
                } else {
                    c
                }
            })
            .collect();
        let segments = SegmentIter::new(&path[root_len..], platform)
            .map(str::to_owned)
            .collect();
        Self { root, segments }
    }

    /// Build a path from an explicit root and components.
    ///
    /// Empty and `.` components are discarded.
    #[must_use]
    pub fn from_parts<I, S>(root: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty() && s != ".")
                .collect(),
        }
    }

    /// The root token, empty for relative paths.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Whether the path has a root.
    #[must_use]
    pub fn is_rooted(&self) -> bool {
        !self.root.is_empty()
    }

    /// Number of name components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether there are no name components (the root may still be present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the name components.
    ///
    /// Every call starts a fresh iteration; no cursor is shared between
    /// iterators.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            inner: self.segments.iter(),
        }
    }

    pub(crate) fn segment_slice(&self) -> &[String] {
        &self.segments
    }

    /// The last component, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The relative path made of components `begin..end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the range is empty, reversed or
    /// out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::path::{PathComponents, UnixPlatform};
    ///
    /// let path = PathComponents::parse("/a/b/c/d", &UnixPlatform);
    /// let sub = path.sub_path(1, 3).unwrap();
    /// assert!(!sub.is_rooted());
    /// assert_eq!(sub.segments().collect::<Vec<_>>(), ["b", "c"]);
    /// ```
    pub fn sub_path(&self, begin: usize, end: usize) -> Result<Self> {
        if begin >= end || end > self.segments.len() {
            return Err(Error::InvalidArgument {
                reason: format!(
                    "sub path range {begin}..{end} is invalid for a path with {} components",
                    self.segments.len()
                ),
            });
        }
        Ok(Self {
            root: String::new(),
            segments: self.segments[begin..end].to_vec(),
        })
    }

    /// The parent path, if there is one.
    ///
    /// A rooted path has a parent as long as it has at least one component
    /// (the parent of `/a` is `/`). A relative path needs at least two
    /// components (`a` has no parent).
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let keep = self.segments.len().checked_sub(1)?;
        if !self.is_rooted() && keep == 0 {
            return None;
        }
        Some(Self {
            root: self.root.clone(),
            segments: self.segments[..keep].to_vec(),
        })
    }

    /// Render the path using `platform`'s preferred separator.
    #[must_use]
    pub fn to_path_string<P: Platform + ?Sized>(&self, platform: &P) -> String {
        let mut out = self.root.clone();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(platform.separator());
            }
            out.push_str(segment);
        }
        out
    }
}

/// Iterator over the components of a [`PathComponents`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Segments<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}

/// Lazily split the part of a path after its root into components.
///
/// Empty and `.` components are skipped.
pub struct SegmentIter<'a, P: ?Sized> {
    rest: &'a str,
    platform: &'a P,
}

impl<'a, P: Platform + ?Sized> SegmentIter<'a, P> {
    /// Start a scan over `rest`, which must not include the root.
    pub fn new(rest: &'a str, platform: &'a P) -> Self {
        Self { rest, platform }
    }
}

impl<'a, P: Platform + ?Sized> Iterator for SegmentIter<'a, P> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let platform = self.platform;
        while !self.rest.is_empty() {
            let rest = self.rest;
            let end = rest
                .find(|c: char| platform.is_separator(c))
                .unwrap_or(rest.len());
            self.rest = rest[end..].trim_start_matches(|c: char| platform.is_separator(c));
            let segment = &rest[..end];
            if !segment.is_empty() && segment != "." {
                return Some(segment);
            }
        }
        None
    }
}

impl<P: Platform + ?Sized> FusedIterator for SegmentIter<'_, P> {}

impl<P: ?Sized> fmt::Debug for SegmentIter<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentIter").field("rest", &self.rest).finish()
    }
}

/// Byte length of the root prefix of `path`.
fn root_length<P: Platform + ?Sized>(path: &str, platform: &P) -> usize {
    let head: Vec<char> = path.chars().take(3).collect();
    let is_sep_at = |i: usize| head.get(i).is_some_and(|&c| platform.is_separator(c));

    if is_sep_at(0) {
        if platform.supports_unc() && is_sep_at(1) {
            if let Some(len) = unc_root_length(path, platform) {
                return len;
            }
        }
        return head[0].len_utf8();
    }

    if platform.has_drive_letter(path) {
        // drive letter and colon are both ASCII
        return if is_sep_at(2) { 3 } else { 2 };
    }

    0
}

/// Root length of `\\server\share\...`, or `None` if the server part is
/// missing its terminating separator.
fn unc_root_length<P: Platform + ?Sized>(path: &str, platform: &P) -> Option<usize> {
    let is_sep = |c: char| platform.is_separator(c);
    let after_prefix = 2;
    let server_end = after_prefix + path[after_prefix..].find(is_sep)?;
    let share_start = server_end + 1;
    Some(match path[share_start..].find(is_sep) {
        Some(offset) => share_start + offset + 1,
        None => path.len(),
    })
}
