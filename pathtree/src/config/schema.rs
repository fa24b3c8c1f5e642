//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment layers can
//! be merged on top of each other; the accessors fill in the defaults.

use serde::{Deserialize, Serialize};

use crate::fs::{CopyOptions, DEFAULT_BUFFER_SIZE};
use crate::path::{DynPlatform, PathAlgebra, PlatformKind};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, CopyConfig};
///
/// let config = Config {
///     copy: Some(CopyConfig {
///         overwrite: Some(true),
///         buffer_size: None,
///     }),
///     ..Default::default()
/// };
/// let options = config.copy_options();
/// assert!(options.overwrite);
/// assert_eq!(options.buffer_size, 8192);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Copy engine settings.
    pub copy: Option<CopyConfig>,

    /// Path syntax used by the path algebra.
    pub platform: Option<PlatformKind>,
}

/// Settings for file and tree copies.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Replace existing destinations.
    pub overwrite: Option<bool>,

    /// Bytes per read/write round trip. Must be positive.
    pub buffer_size: Option<usize>,
}

impl Config {
    /// The copy options described by this configuration.
    #[must_use]
    pub fn copy_options(&self) -> CopyOptions {
        let copy = self.copy.as_ref();
        CopyOptions::new()
            .with_overwrite(copy.and_then(|c| c.overwrite).unwrap_or(false))
            .with_buffer_size(
                copy.and_then(|c| c.buffer_size)
                    .unwrap_or(DEFAULT_BUFFER_SIZE),
            )
    }

    /// The configured platform, defaulting to the host's.
    #[must_use]
    pub fn platform_kind(&self) -> PlatformKind {
        self.platform.unwrap_or_default()
    }

    /// A path algebra for the configured platform.
    #[must_use]
    pub fn path_algebra(&self) -> PathAlgebra<DynPlatform> {
        PathAlgebra::from(self.platform_kind())
    }
}
