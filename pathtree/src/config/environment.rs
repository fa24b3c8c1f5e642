//! Environment variable handling for configuration overrides.
//!
//! Recognized variables:
//!
//! - `PATHTREE_BUFFER_SIZE`: copy chunk size in bytes
//! - `PATHTREE_OVERWRITE`: boolean, replace existing destinations
//! - `PATHTREE_PLATFORM`: `native`, `unix` or `windows`

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::PlatformKind;

/// Copy chunk size override.
pub const BUFFER_SIZE_ENV: &str = "PATHTREE_BUFFER_SIZE";
/// Overwrite flag override.
pub const OVERWRITE_ENV: &str = "PATHTREE_OVERWRITE";
/// Platform override.
pub const PLATFORM_ENV: &str = "PATHTREE_PLATFORM";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathtree::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
#[derive(Debug)]
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `PATHTREE_*` overrides to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(BUFFER_SIZE_ENV) {
            let size = val.trim().parse().map_err(|_| Error::Validation {
                field: BUFFER_SIZE_ENV.into(),
                message: format!("Must be a positive integer, got '{val}'"),
            })?;
            config.copy.get_or_insert_with(Default::default).buffer_size = Some(size);
        }

        if let Ok(val) = env::var(OVERWRITE_ENV) {
            let overwrite = Self::parse_bool(OVERWRITE_ENV, &val)?;
            config.copy.get_or_insert_with(Default::default).overwrite = Some(overwrite);
        }

        if let Ok(val) = env::var(PLATFORM_ENV) {
            let platform = PlatformKind::parse(val.trim()).map_err(|message| Error::Validation {
                field: PLATFORM_ENV.into(),
                message,
            })?;
            config.platform = Some(platform);
        }

        Ok(())
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
