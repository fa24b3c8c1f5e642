//! Configuration validation.

use crate::config::schema::{Config, CopyConfig};
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref copy) = config.copy {
            Self::validate_copy(copy)?;
        }
        Ok(())
    }

    fn validate_copy(copy: &CopyConfig) -> Result<()> {
        if copy.buffer_size == Some(0) {
            return Err(Error::Validation {
                field: "copy.buffer_size".into(),
                message: "Buffer size must be greater than 0".into(),
            });
        }
        Ok(())
    }
}
