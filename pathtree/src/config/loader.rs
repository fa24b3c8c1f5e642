//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the shared configuration file.
pub const CONFIG_FILE: &str = "pathtree.yaml";

/// Name of the untracked, machine-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "pathtree.local.yaml";

/// A parsed configuration file with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
///
/// # Examples
///
/// ```no_run
/// use pathtree::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::discover(Path::new(".")).unwrap();
/// println!("Found {} configuration files", sources.len());
/// ```
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Find the configuration files that apply to `start_dir`.
    ///
    /// Walks up from `start_dir` and stops at the first directory holding
    /// `pathtree.yaml` (precedence 1) or `pathtree.local.yaml` (precedence
    /// 2). Results are sorted lowest precedence first.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut current = start_dir.to_path_buf();
        loop {
            let mut sources = Vec::new();
            for (name, precedence) in [(CONFIG_FILE, 1), (LOCAL_CONFIG_FILE, 2)] {
                if let Some(source) = Self::load_if_exists(&current.join(name), precedence)? {
                    sources.push(source);
                }
            }

            if !sources.is_empty() || !current.pop() {
                log::debug!(
                    "found {} configuration file(s) from {}",
                    sources.len(),
                    start_dir.display()
                );
                return Ok(sources);
            }
        }
    }

    /// Load `path` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_if_exists(path: &Path, precedence: u8) -> Result<Option<ConfigSource>> {
        if !path.exists() {
            return Ok(None);
        }
        let config = Self::load_file(path)?;
        Ok(Some(ConfigSource {
            path: path.to_path_buf(),
            precedence,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the YAML is malformed or has
    /// unknown fields.
    pub fn parse(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/pathtree.yaml"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "copy:\n  overwrite: true\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert!(config.copy_options().overwrite);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("\n  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_load_if_exists_missing() {
        let temp_dir = TempDir::new().unwrap();
        let source = ConfigLoader::load_if_exists(&temp_dir.path().join(CONFIG_FILE), 1).unwrap();
        assert!(source.is_none());
    }

    #[test]
    fn test_discover_no_configs() {
        let temp_dir = TempDir::new().unwrap();
        let configs = ConfigLoader::discover(temp_dir.path()).unwrap();
        assert!(configs.is_empty());
    }

    #[test]
    fn test_discover_both_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "platform: unix\n").unwrap();
        fs::write(temp_dir.path().join(LOCAL_CONFIG_FILE), "platform: windows\n").unwrap();

        let configs = ConfigLoader::discover(temp_dir.path()).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].precedence, 1);
        assert_eq!(configs[1].precedence, 2);
        assert_eq!(configs[1].path, temp_dir.path().join(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child").join("grandchild");
        fs::create_dir_all(&child).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "copy:\n  buffer_size: 42\n").unwrap();

        let configs = ConfigLoader::discover(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].config.copy_options().buffer_size, 42);
    }
}
