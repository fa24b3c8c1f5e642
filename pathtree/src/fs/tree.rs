//! Recursive copy and delete.
//!
//! Both engines walk with an explicit work stack rather than recursion, so
//! tree depth is bounded by memory, not by the call stack. Directories are
//! created before any of their children are visited; deletions remove
//! children before their parent.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::copy::{copy_file, CopyOptions};
use crate::fs::policy::{ErrorDecision, ErrorPolicy};
use crate::fs::Filesystem;
use crate::path::{path_str, NativePlatform, PathAlgebra};

/// How a tree walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeWalkResult {
    /// Every node was visited (some may have been skipped by the policy).
    Completed,
    /// The policy asked to stop; no further nodes were processed.
    Terminated,
}

impl TreeWalkResult {
    /// Whether the walk ran to the end.
    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl From<TreeWalkResult> for bool {
    fn from(result: TreeWalkResult) -> Self {
        result.is_completed()
    }
}

/// Copy the tree rooted at `source` onto `target`.
///
/// Each node's destination is its path relative to `source` resolved under
/// `target`. Files are always written with overwrite on. Every failure goes
/// through `policy`: [`ErrorDecision::Skip`] leaves that node (and anything
/// below it) alone, [`ErrorDecision::Terminate`] stops the walk. Partial
/// results on disk are not rolled back.
///
/// With `options.overwrite` on, a conflicting destination is deleted first
/// and only reported if it survives the deletion.
///
/// # Errors
///
/// Returns whatever error the policy chooses to propagate, or
/// [`Error::InvalidArgument`] / [`Error::InvalidPath`] if the arguments
/// themselves are unusable.
///
/// # Examples
///
/// ```no_run
/// use pathtree::fs::{copy_recursively, CopyOptions, ErrorDecision, StdFilesystem};
/// use pathtree::Error;
/// use std::path::Path;
///
/// let mut keep_existing = |_: &Path, err: &Error| {
///     if err.is_already_exists() { ErrorDecision::Skip } else { ErrorDecision::Terminate }
/// };
/// let outcome = copy_recursively(
///     &StdFilesystem,
///     Path::new("site"),
///     Path::new("/var/www/site"),
///     &CopyOptions::default(),
///     &mut keep_existing,
/// )
/// .unwrap();
/// println!("completed: {}", outcome.is_completed());
/// ```
pub fn copy_recursively<F, E>(
    fs: &F,
    source: &Path,
    target: &Path,
    options: &CopyOptions,
    policy: &mut E,
) -> Result<TreeWalkResult>
where
    F: Filesystem + ?Sized,
    E: ErrorPolicy + ?Sized,
{
    options.check()?;
    let walk = CopyWalk {
        fs,
        algebra: PathAlgebra::new(),
        source_root: path_str(source)?,
        target_root: path_str(target)?,
        overwrite: options.overwrite,
        file_options: options.with_overwrite(true),
    };

    let mut pending = vec![source.to_path_buf()];
    while let Some(node) = pending.pop() {
        if walk.visit(&node, &mut pending, policy)?.is_break() {
            log::info!(
                "copy of {} onto {} terminated at {}",
                source.display(),
                target.display(),
                node.display()
            );
            return Ok(TreeWalkResult::Terminated);
        }
    }

    log::info!("copied {} onto {}", source.display(), target.display());
    Ok(TreeWalkResult::Completed)
}

struct CopyWalk<'a, F: ?Sized> {
    fs: &'a F,
    algebra: PathAlgebra<NativePlatform>,
    source_root: &'a str,
    target_root: &'a str,
    overwrite: bool,
    file_options: CopyOptions,
}

impl<F: Filesystem + ?Sized> CopyWalk<'_, F> {
    fn visit<E: ErrorPolicy + ?Sized>(
        &self,
        node: &Path,
        pending: &mut Vec<PathBuf>,
        policy: &mut E,
    ) -> Result<ControlFlow<()>> {
        log::debug!("visiting {}", node.display());

        if !self.fs.exists(node) {
            let err = Error::NotFound {
                path: node.to_path_buf(),
            };
            return consult(policy, node, err);
        }

        let destination = match self.destination_for(node) {
            Ok(destination) => destination,
            Err(err) => return consult(policy, node, err),
        };

        let node_is_dir = self.fs.is_dir(node);
        if self.fs.exists(&destination) && !(node_is_dir && self.fs.is_dir(&destination)) {
            let still_exists = !self.overwrite || !self.remove_conflict(&destination);
            if still_exists {
                let err = Error::AlreadyExists {
                    path: destination.clone(),
                    other: Some(node.to_path_buf()),
                };
                return consult(policy, &destination, err);
            }
        }

        if node_is_dir {
            if let Err(e) = self.fs.create_dir_all(&destination) {
                return consult(policy, &destination, Error::from_io(&destination, e));
            }
            match self.fs.read_dir(node) {
                Ok(mut children) => {
                    children.sort();
                    pending.extend(children.into_iter().rev());
                }
                Err(e) => {
                    log::debug!("cannot list {}: {e}", node.display());
                    let err = Error::AccessDenied {
                        path: node.to_path_buf(),
                    };
                    return consult(policy, node, err);
                }
            }
            return Ok(ControlFlow::Continue(()));
        }

        let copied = match copy_file(self.fs, node, &destination, &self.file_options) {
            Ok(copied) => copied,
            Err(err) => return consult(policy, node, err),
        };
        match self.fs.file_len(node) {
            Ok(expected) if expected == copied => Ok(ControlFlow::Continue(())),
            Ok(expected) => {
                let err = Error::LengthMismatch {
                    path: node.to_path_buf(),
                    expected,
                    actual: copied,
                };
                consult(policy, node, err)
            }
            Err(e) => consult(policy, node, Error::from_io(node, e)),
        }
    }

    /// Rebase `node` from under the source root to under the target root.
    fn destination_for(&self, node: &Path) -> Result<PathBuf> {
        let relative = self
            .algebra
            .relative_to(self.fs, path_str(node)?, self.source_root)?;
        if self
            .algebra
            .decompose(&relative)
            .segments()
            .next()
            .is_some_and(|first| first == "..")
        {
            return Err(Error::InvalidArgument {
                reason: format!(
                    "{} resolves outside of {}",
                    node.display(),
                    self.source_root
                ),
            });
        }
        Ok(PathBuf::from(self.algebra.resolve(self.target_root, &relative)))
    }

    fn remove_conflict(&self, destination: &Path) -> bool {
        log::debug!("replacing existing {}", destination.display());
        if self.fs.is_dir(destination) && !self.fs.is_symlink(destination) {
            delete_recursively(self.fs, destination)
        } else {
            self.fs.remove(destination).is_ok()
        }
    }
}

fn consult<E: ErrorPolicy + ?Sized>(
    policy: &mut E,
    path: &Path,
    error: Error,
) -> Result<ControlFlow<()>> {
    log::warn!("{}: {error}", path.display());
    match policy.on_error(path, error)? {
        ErrorDecision::Skip => {
            log::debug!("skipping {}", path.display());
            Ok(ControlFlow::Continue(()))
        }
        ErrorDecision::Terminate => Ok(ControlFlow::Break(())),
    }
}

/// Delete `target` and everything below it, as far as possible.
///
/// Every child is attempted regardless of how its siblings fared, and the
/// individual outcomes are not reported. The result is whether `target`
/// itself is gone at the end, so a directory that keeps a single undeletable
/// descendant reports `false` even though the rest of the tree was removed.
/// Symlinks are removed, never followed.
///
/// # Examples
///
/// ```no_run
/// use pathtree::fs::{delete_recursively, StdFilesystem};
/// use std::path::Path;
///
/// if !delete_recursively(&StdFilesystem, Path::new("build")) {
///     eprintln!("build directory could not be removed completely");
/// }
/// ```
pub fn delete_recursively<F: Filesystem + ?Sized>(fs: &F, target: &Path) -> bool {
    // (path, children already queued)
    let mut pending = vec![(target.to_path_buf(), false)];
    let mut deleted = false;

    while let Some((path, expanded)) = pending.pop() {
        if !expanded && fs.is_dir(&path) && !fs.is_symlink(&path) {
            pending.push((path.clone(), true));
            match fs.read_dir(&path) {
                Ok(children) => pending.extend(children.into_iter().map(|c| (c, false))),
                Err(e) => log::debug!("cannot list {}: {e}", path.display()),
            }
            continue;
        }

        deleted = match fs.remove(&path) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("cannot delete {}: {e}", path.display());
                false
            }
        };
    }

    if !deleted {
        log::warn!("{} was not deleted", target.display());
    }
    deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{CollectErrors, MockFilesystem, Propagate, StdFilesystem};
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_copy_single_file_root() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        write(&src, "abc");
        let dst = dir.path().join("out").join("a.txt");

        let result =
            copy_recursively(&StdFilesystem, &src, &dst, &CopyOptions::default(), &mut Propagate)
                .unwrap();
        assert_eq!(result, TreeWalkResult::Completed);
        assert_eq!(fs::read_to_string(dst).unwrap(), "abc");
    }

    #[test]
    fn test_copy_empty_directories() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("empty").join("deeper")).unwrap();
        let dst = dir.path().join("dst");

        let result =
            copy_recursively(&StdFilesystem, &src, &dst, &CopyOptions::default(), &mut Propagate)
                .unwrap();
        assert!(result.is_completed());
        assert!(dst.join("empty").join("deeper").is_dir());
    }

    #[test]
    fn test_copy_missing_source_uses_policy() {
        let dir = tempdir().unwrap();
        let mut policy = CollectErrors::default();
        let result = copy_recursively(
            &StdFilesystem,
            &dir.path().join("missing"),
            &dir.path().join("dst"),
            &CopyOptions::default(),
            &mut policy,
        )
        .unwrap();
        assert!(result.is_completed());
        assert_eq!(policy.errors().len(), 1);
        assert!(policy.errors()[0].1.is_not_found());
    }

    #[test]
    fn test_copy_default_policy_propagates() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        write(&src.join("a.txt"), "new");
        write(&dir.path().join("dst").join("a.txt"), "old");

        let err = copy_recursively(
            &StdFilesystem,
            &src,
            &dir.path().join("dst"),
            &CopyOptions::default(),
            &mut Propagate,
        )
        .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_copy_overwrite_replaces_conflicts() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        write(&src.join("a.txt"), "new");
        write(&src.join("sub").join("b.txt"), "bee");
        write(&dst.join("a.txt"), "old contents");
        // a file where the source has a directory
        write(&dst.join("sub"), "not a directory");

        let options = CopyOptions::new().with_overwrite(true);
        let result = copy_recursively(&StdFilesystem, &src, &dst, &options, &mut Propagate).unwrap();
        assert!(result.is_completed());
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.join("sub").join("b.txt")).unwrap(), "bee");
    }

    #[test]
    fn test_copy_skip_on_directory_conflict_skips_subtree() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        write(&src.join("sub").join("b.txt"), "bee");
        write(&src.join("z.txt"), "zed");
        write(&dst.join("sub"), "file in the way");

        let mut policy = CollectErrors::default();
        let result =
            copy_recursively(&StdFilesystem, &src, &dst, &CopyOptions::default(), &mut policy)
                .unwrap();
        assert!(result.is_completed());
        assert_eq!(policy.errors().len(), 1);
        assert_eq!(policy.errors()[0].0, dst.join("sub"));
        assert_eq!(fs::read_to_string(dst.join("sub")).unwrap(), "file in the way");
        assert!(dst.join("z.txt").exists());
    }

    #[test]
    fn test_copy_zero_buffer_rejected_up_front() {
        let fs = MockFilesystem::new();
        let options = CopyOptions::new().with_buffer_size(0);
        let err = copy_recursively(&fs, Path::new("/s"), Path::new("/t"), &options, &mut Propagate)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_copy_unlistable_directory_reports_access_denied() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/s"));
        fs.expect_is_dir().returning(|p| p == Path::new("/s"));
        fs.expect_canonicalize().returning(|p| Ok(p.to_path_buf()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_read_dir()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "no")));

        let mut kinds = Vec::new();
        let mut policy = |path: &Path, err: &Error| {
            kinds.push((path.to_path_buf(), err.kind()));
            ErrorDecision::Skip
        };
        let result = copy_recursively(
            &fs,
            Path::new("/s"),
            Path::new("/t"),
            &CopyOptions::default(),
            &mut policy,
        )
        .unwrap();
        assert!(result.is_completed());
        assert_eq!(
            kinds,
            vec![(PathBuf::from("/s"), crate::ErrorKind::AccessDenied)]
        );
    }

    #[test]
    fn test_copy_length_mismatch_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/s"));
        fs.expect_is_dir().returning(|_| false);
        fs.expect_is_symlink().returning(|_| false);
        fs.expect_canonicalize().returning(|p| Ok(p.to_path_buf()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_open_read()
            .returning(|_| Ok(Box::new(io::Cursor::new(b"abc".to_vec()))));
        fs.expect_create_write()
            .returning(|_| Ok(Box::new(io::sink())));
        fs.expect_file_len().returning(|_| Ok(10));

        let mut seen = None;
        let mut policy = |_: &Path, err: &Error| {
            seen = Some(err.kind());
            ErrorDecision::Terminate
        };
        let result = copy_recursively(
            &fs,
            Path::new("/s"),
            Path::new("/t"),
            &CopyOptions::default(),
            &mut policy,
        )
        .unwrap();
        assert_eq!(result, TreeWalkResult::Terminated);
        assert_eq!(seen, Some(crate::ErrorKind::IoFailure));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_rejects_symlink_escaping_root() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside.txt");
        write(&outside, "secret");
        let src = dir.path().join("src");
        write(&src.join("a.txt"), "a");
        symlink(&outside, src.join("link.txt")).unwrap();
        let dst = dir.path().join("dst");

        let mut policy = CollectErrors::default();
        let result =
            copy_recursively(&StdFilesystem, &src, &dst, &CopyOptions::default(), &mut policy)
                .unwrap();
        assert!(result.is_completed());
        assert!(dst.join("a.txt").exists());
        assert!(!dst.join("link.txt").exists());
        assert_eq!(policy.errors().len(), 1);
        assert!(matches!(policy.errors()[0].1, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_delete_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        write(&root.join("a.txt"), "a");
        write(&root.join("sub").join("deeper").join("b.txt"), "b");

        assert!(delete_recursively(&StdFilesystem, &root));
        assert!(!root.exists());
    }

    #[test]
    fn test_delete_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f");
        write(&file, "x");
        assert!(delete_recursively(&StdFilesystem, &file));
        assert!(!file.exists());
    }

    #[test]
    fn test_delete_missing_target_is_false() {
        let dir = tempdir().unwrap();
        assert!(!delete_recursively(&StdFilesystem, &dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_does_not_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let keep = dir.path().join("keep");
        write(&keep.join("precious.txt"), "p");
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        symlink(&keep, root.join("link")).unwrap();

        assert!(delete_recursively(&StdFilesystem, &root));
        assert!(keep.join("precious.txt").exists());
    }

    #[test]
    fn test_delete_attempts_every_child_and_reports_root_only() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new("/r"));
        fs.expect_is_symlink().returning(|_| false);
        fs.expect_read_dir().returning(|_| {
            Ok(vec![
                PathBuf::from("/r/a"),
                PathBuf::from("/r/stuck"),
                PathBuf::from("/r/c"),
            ])
        });
        fs.expect_remove()
            .withf(|p| p == Path::new("/r/a") || p == Path::new("/r/c"))
            .times(2)
            .returning(|_| Ok(()));
        fs.expect_remove()
            .withf(|p| p == Path::new("/r/stuck"))
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "no")));
        fs.expect_remove()
            .withf(|p| p == Path::new("/r"))
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::DirectoryNotEmpty, "busy")));

        assert!(!delete_recursively(&fs, Path::new("/r")));
    }
}
