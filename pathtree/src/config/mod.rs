//! Configuration system for pathtree.
//!
//! This module provides layered configuration for the copy engines and the
//! path algebra:
//! - YAML configuration files (`pathtree.yaml`, `pathtree.local.yaml`)
//! - Environment variable overrides (`PATHTREE_*`)
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHTREE_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. `pathtree.local.yaml`
//! 5. `pathtree.yaml`
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use pathtree::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! let options = config.copy_options();
//! let algebra = config.path_algebra();
//! println!("{options:?} {algebra:?}");
//! ```

mod builder;
mod environment;
mod loader;
mod merger;
mod schema;
mod validator;

pub use builder::ConfigBuilder;
pub use environment::{EnvironmentConfig, BUFFER_SIZE_ENV, OVERWRITE_ENV, PLATFORM_ENV};
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE, LOCAL_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, CopyConfig};
pub use validator::ConfigValidator;
