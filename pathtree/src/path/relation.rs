//! Structural relations between paths.
//!
//! This module provides prefix/suffix containment, `..` normalization and
//! path joining. Everything here is pure: no filesystem access, no case
//! folding, and results are always fresh values.

use crate::path::components::PathComponents;
use crate::path::platform::Platform;

const PARENT: &str = "..";

impl PathComponents {
    /// Whether `prefix` is a leading part of this path.
    ///
    /// A relative `prefix` matches regardless of this path's root; a rooted
    /// one requires an identical root. An empty `prefix` always matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::path::{PathComponents, UnixPlatform};
    ///
    /// let path = PathComponents::parse("/a/b/c", &UnixPlatform);
    /// assert!(path.starts_with(&PathComponents::parse("/a/b", &UnixPlatform)));
    /// assert!(path.starts_with(&PathComponents::parse("a", &UnixPlatform)));
    /// assert!(!path.starts_with(&PathComponents::parse("/a/bc", &UnixPlatform)));
    /// ```
    #[must_use]
    pub fn starts_with(&self, prefix: &PathComponents) -> bool {
        if !roots_compatible(self, prefix) {
            return false;
        }
        let ours = self.segment_slice();
        let theirs = prefix.segment_slice();
        ours.len() >= theirs.len() && ours[..theirs.len()] == *theirs
    }

    /// Whether `suffix` is a trailing part of this path.
    ///
    /// Roots follow the same rule as [`PathComponents::starts_with`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::path::{PathComponents, UnixPlatform};
    ///
    /// let path = PathComponents::parse("/a/b/c", &UnixPlatform);
    /// assert!(path.ends_with(&PathComponents::parse("b/c", &UnixPlatform)));
    /// assert!(!path.ends_with(&PathComponents::parse("a/b", &UnixPlatform)));
    /// ```
    #[must_use]
    pub fn ends_with(&self, suffix: &PathComponents) -> bool {
        if !roots_compatible(self, suffix) {
            return false;
        }
        let ours = self.segment_slice();
        let theirs = suffix.segment_slice();
        ours.len() >= theirs.len() && ours[ours.len() - theirs.len()..] == *theirs
    }

    /// Cancel every `..` against the real component before it.
    ///
    /// The scan restarts from the earliest affected position after each
    /// cancellation, so chains like `a/b/../../c` collapse fully. A `..`
    /// with nothing real before it is kept, and the root is never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::path::{PathComponents, UnixPlatform};
    ///
    /// let path = PathComponents::parse("/foo/./bar/gav/../baaz", &UnixPlatform);
    /// assert_eq!(path.normalize().to_path_string(&UnixPlatform), "/foo/bar/baaz");
    ///
    /// let path = PathComponents::parse("../a/../../b", &UnixPlatform);
    /// assert_eq!(path.normalize().to_path_string(&UnixPlatform), "../../b");
    /// ```
    #[must_use]
    pub fn normalize(&self) -> PathComponents {
        let mut segments = self.segment_slice().to_vec();
        let mut i = 0;
        while i < segments.len() {
            if i > 0 && segments[i] == PARENT && segments[i - 1] != PARENT {
                segments.drain(i - 1..=i);
                i -= 1;
            } else {
                i += 1;
            }
        }
        PathComponents::from_parts(self.root(), segments)
    }
}

fn roots_compatible(path: &PathComponents, other: &PathComponents) -> bool {
    !other.is_rooted() || path.root() == other.root()
}

/// Join `relative` onto `base`.
///
/// A rooted `relative` replaces `base` entirely. Otherwise exactly one
/// separator is placed between the two, unless `base` already ends with one.
/// Joining onto an empty `base` yields `relative`, and joining an empty
/// `relative` yields `base`.
///
/// # Examples
///
/// ```
/// use pathtree::path::{relation::resolve, UnixPlatform};
///
/// assert_eq!(resolve("/a/b", "c/d", &UnixPlatform), "/a/b/c/d");
/// assert_eq!(resolve("/a/b/", "c", &UnixPlatform), "/a/b/c");
/// assert_eq!(resolve("/a/b", "/etc", &UnixPlatform), "/etc");
/// ```
#[must_use]
pub fn resolve<P: Platform + ?Sized>(base: &str, relative: &str, platform: &P) -> String {
    if PathComponents::parse(relative, platform).is_rooted() {
        return relative.to_string();
    }
    if base.is_empty() {
        return relative.to_string();
    }
    if relative.is_empty() {
        return base.to_string();
    }

    let mut joined = String::with_capacity(base.len() + 1 + relative.len());
    joined.push_str(base);
    if !base.ends_with(|c: char| platform.is_separator(c)) {
        joined.push(platform.separator());
    }
    joined.push_str(relative);
    joined
}

/// Join `relative` onto the parent of `path`.
///
/// If `path` has no parent (see [`PathComponents::parent`]), `relative` is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use pathtree::path::{relation::resolve_sibling, UnixPlatform};
///
/// assert_eq!(resolve_sibling("/a/b", "c", &UnixPlatform), "/a/c");
/// assert_eq!(resolve_sibling("b", "c", &UnixPlatform), "c");
/// ```
#[must_use]
pub fn resolve_sibling<P: Platform + ?Sized>(path: &str, relative: &str, platform: &P) -> String {
    match PathComponents::parse(path, platform).parent() {
        Some(parent) => resolve(&parent.to_path_string(platform), relative, platform),
        None => relative.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::platform::{UnixPlatform, WindowsPlatform};

    fn unix(s: &str) -> PathComponents {
        PathComponents::parse(s, &UnixPlatform)
    }

    fn windows(s: &str) -> PathComponents {
        PathComponents::parse(s, &WindowsPlatform)
    }

    fn normalized(s: &str) -> String {
        unix(s).normalize().to_path_string(&UnixPlatform)
    }

    #[test]
    fn test_starts_with_prefix() {
        assert!(unix("/a/b/c").starts_with(&unix("/a")));
        assert!(unix("/a/b/c").starts_with(&unix("/a/b/c")));
        assert!(!unix("/a/b").starts_with(&unix("/a/b/c")));
        assert!(!unix("/ab/c").starts_with(&unix("/a")));
    }

    #[test]
    fn test_starts_with_empty_prefix() {
        assert!(unix("/a").starts_with(&unix("")));
        assert!(unix("/a").starts_with(&unix("/")));
        assert!(unix("a").starts_with(&unix(".")));
    }

    #[test]
    fn test_starts_with_root_rules() {
        // relative prefix accepts any root
        assert!(unix("/a/b").starts_with(&unix("a")));
        // rooted prefix requires the same root
        assert!(!unix("a/b").starts_with(&unix("/a")));
        assert!(!windows("C:\\a").starts_with(&windows("D:\\a")));
        assert!(windows("C:\\a").starts_with(&windows("C:/a")));
    }

    #[test]
    fn test_starts_with_is_case_sensitive() {
        assert!(!unix("/A/b").starts_with(&unix("/a")));
        assert!(!windows("C:\\Users").starts_with(&windows("C:\\users")));
    }

    #[test]
    fn test_ends_with_suffix() {
        assert!(unix("/a/b/c").ends_with(&unix("c")));
        assert!(unix("/a/b/c").ends_with(&unix("b/c")));
        assert!(unix("/a/b/c").ends_with(&unix("/a/b/c")));
        assert!(!unix("/a/b/c").ends_with(&unix("a/b")));
        assert!(!unix("b/c").ends_with(&unix("a/b/c")));
        assert!(!unix("/a/bc").ends_with(&unix("c")));
    }

    #[test]
    fn test_ends_with_root_rules() {
        assert!(unix("/a").ends_with(&unix("")));
        assert!(!unix("a/b").ends_with(&unix("/b")));
        assert!(!windows("C:\\a\\b").ends_with(&windows("D:\\b")));
    }

    #[test]
    fn test_normalize_cancels_parent() {
        assert_eq!(normalized("/foo/./bar/gav/../baaz"), "/foo/bar/baaz");
        assert_eq!(normalized("/a/b/../../c"), "/c");
        assert_eq!(normalized("a/b/c/../../.."), "");
    }

    #[test]
    fn test_normalize_keeps_leading_parent() {
        assert_eq!(normalized("../a"), "../a");
        assert_eq!(normalized("../../a/b/.."), "../../a");
        assert_eq!(normalized("/../a"), "/../a");
        assert_eq!(normalized("a/../../b"), "../b");
    }

    #[test]
    fn test_normalize_restarts_scan() {
        // b/.. collapses first, exposing a/.. which must collapse too
        assert_eq!(normalized("x/a/b/../../y"), "x/y");
    }

    #[test]
    fn test_normalize_preserves_root() {
        let p = windows("C:\\a\\..\\b").normalize();
        assert_eq!(p.root(), "C:\\");
        assert_eq!(p.to_path_string(&WindowsPlatform), "C:\\b");
    }

    #[test]
    fn test_resolve_joins_once() {
        assert_eq!(resolve("/a", "b", &UnixPlatform), "/a/b");
        assert_eq!(resolve("/", "b", &UnixPlatform), "/b");
        assert_eq!(resolve("a", "b/c", &UnixPlatform), "a/b/c");
        assert_eq!(resolve("C:\\x", "y", &WindowsPlatform), "C:\\x\\y");
        assert_eq!(resolve("C:\\x/", "y", &WindowsPlatform), "C:\\x/y");
    }

    #[test]
    fn test_resolve_absolute_override() {
        assert_eq!(resolve("/a", "/b", &UnixPlatform), "/b");
        assert_eq!(resolve("C:\\x", "D:\\y", &WindowsPlatform), "D:\\y");
        assert_eq!(resolve("C:\\x", "\\y", &WindowsPlatform), "\\y");
    }

    #[test]
    fn test_resolve_empty_sides() {
        assert_eq!(resolve("", "b", &UnixPlatform), "b");
        assert_eq!(resolve("/a", "", &UnixPlatform), "/a");
    }

    #[test]
    fn test_resolve_sibling() {
        assert_eq!(resolve_sibling("/a/b", "c", &UnixPlatform), "/a/c");
        assert_eq!(resolve_sibling("/a", "c", &UnixPlatform), "/c");
        assert_eq!(resolve_sibling("a/b", "c", &UnixPlatform), "a/c");
        assert_eq!(resolve_sibling("a", "c", &UnixPlatform), "c");
        assert_eq!(resolve_sibling("/", "c", &UnixPlatform), "c");
        assert_eq!(resolve_sibling("/a/b", "/z", &UnixPlatform), "/z");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            (
                prop_oneof![Just(""), Just("/")],
                prop::collection::vec(
                    prop_oneof![
                        Just(".".to_string()),
                        Just("..".to_string()),
                        "[a-z0-9_-]{1,6}".prop_map(|s| s),
                    ],
                    0..=8,
                ),
            )
                .prop_map(|(root, parts)| format!("{root}{}", parts.join("/")))
        }

        proptest! {
            /// normalize(normalize(p)) == normalize(p)
            #[test]
            fn normalize_idempotent(s in path_with_dots_strategy()) {
                let once = unix(&s).normalize();
                let twice = once.normalize();
                prop_assert_eq!(once, twice);
            }

            /// After normalization a ".." can only be preceded by another ".."
            #[test]
            fn normalize_leaves_only_leading_parents(s in path_with_dots_strategy()) {
                let normalized = unix(&s).normalize();
                let segments: Vec<_> = normalized.segments().collect();
                let leading = segments.iter().take_while(|s| **s == "..").count();
                prop_assert!(segments[leading..].iter().all(|s| *s != ".."));
            }

            #[test]
            fn starts_with_reflexive(s in path_with_dots_strategy()) {
                let p = unix(&s);
                prop_assert!(p.starts_with(&p));
            }

            #[test]
            fn ends_with_reflexive(s in path_with_dots_strategy()) {
                let p = unix(&s);
                prop_assert!(p.ends_with(&p));
            }

            /// resolve produces a path that starts with its base and ends with the relative part
            #[test]
            fn resolve_contains_both_sides(
                base in prop::collection::vec("[a-z0-9]{1,6}", 0..4),
                rel in prop::collection::vec("[a-z0-9]{1,6}", 1..4),
            ) {
                let base_str = format!("/{}", base.join("/"));
                let rel_str = rel.join("/");
                let joined = unix(&resolve(&base_str, &rel_str, &UnixPlatform));
                prop_assert!(joined.starts_with(&unix(&base_str)));
                prop_assert!(joined.ends_with(&unix(&rel_str)));
            }
        }
    }
}
