//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, CopyConfig};

/// Merges configuration layers according to precedence.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, ConfigMerger};
/// use pathtree::path::PlatformKind;
///
/// let low = Config { platform: Some(PlatformKind::Unix), ..Default::default() };
/// let high = Config { platform: Some(PlatformKind::Windows), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.platform, Some(PlatformKind::Windows));
/// ```
#[derive(Debug)]
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; set fields in `source` win.
    ///
    /// The copy section is merged field by field, so a layer that only sets
    /// `buffer_size` keeps an `overwrite` from below.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.platform.is_some() {
            target.platform = source.platform;
        }

        if let Some(ref source_copy) = source.copy {
            let target_copy = target.copy.get_or_insert_with(CopyConfig::default);
            if source_copy.overwrite.is_some() {
                target_copy.overwrite = source_copy.overwrite;
            }
            if source_copy.buffer_size.is_some() {
                target_copy.buffer_size = source_copy.buffer_size;
            }
        }
    }
}
