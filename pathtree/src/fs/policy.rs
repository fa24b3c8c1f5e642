//! Error policies for tree walks.
//!
//! A tree copy never decides on its own what to do about a failure. Each one
//! is handed to an [`ErrorPolicy`] together with the offending path, and the
//! policy either answers with an [`ErrorDecision`] or propagates the error.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// What a tree walk should do after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDecision {
    /// Leave the offending node alone and carry on with the rest of the walk.
    Skip,
    /// Stop the walk immediately.
    Terminate,
}

/// Decides how a tree walk reacts to each failure.
///
/// Any `FnMut(&Path, &Error) -> ErrorDecision` closure is a policy:
///
/// ```
/// use pathtree::fs::{ErrorDecision, ErrorPolicy};
/// use pathtree::Error;
/// use std::path::{Path, PathBuf};
///
/// let mut skip_conflicts = |_: &Path, err: &Error| {
///     if err.is_already_exists() {
///         ErrorDecision::Skip
///     } else {
///         ErrorDecision::Terminate
///     }
/// };
/// let err = Error::AlreadyExists { path: PathBuf::from("dst"), other: None };
/// let decision = skip_conflicts.on_error(Path::new("dst"), err).unwrap();
/// assert_eq!(decision, ErrorDecision::Skip);
/// ```
pub trait ErrorPolicy {
    /// Called once per failure, never for successes.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the walk and hands that error to the caller.
    fn on_error(&mut self, path: &Path, error: Error) -> Result<ErrorDecision>;
}

impl<F> ErrorPolicy for F
where
    F: FnMut(&Path, &Error) -> ErrorDecision,
{
    fn on_error(&mut self, path: &Path, error: Error) -> Result<ErrorDecision> {
        Ok(self(path, &error))
    }
}

/// The default policy: every failure is returned to the caller as-is,
/// aborting the walk on the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Propagate;

impl ErrorPolicy for Propagate {
    fn on_error(&mut self, _path: &Path, error: Error) -> Result<ErrorDecision> {
        Err(error)
    }
}

/// Skips every failure and keeps it for later inspection.
///
/// # Examples
///
/// ```
/// use pathtree::fs::{CollectErrors, ErrorDecision, ErrorPolicy};
/// use pathtree::Error;
/// use std::path::{Path, PathBuf};
///
/// let mut policy = CollectErrors::default();
/// let err = Error::NotFound { path: PathBuf::from("gone") };
/// assert_eq!(policy.on_error(Path::new("gone"), err).unwrap(), ErrorDecision::Skip);
/// assert_eq!(policy.errors().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CollectErrors {
    errors: Vec<(PathBuf, Error)>,
}

impl CollectErrors {
    /// Failures seen so far, in the order they happened.
    #[must_use]
    pub fn errors(&self) -> &[(PathBuf, Error)] {
        &self.errors
    }

    /// Whether any failure was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the policy, returning the collected failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<(PathBuf, Error)> {
        self.errors
    }
}

impl ErrorPolicy for CollectErrors {
    fn on_error(&mut self, path: &Path, error: Error) -> Result<ErrorDecision> {
        self.errors.push((path.to_path_buf(), error));
        Ok(ErrorDecision::Skip)
    }
}
