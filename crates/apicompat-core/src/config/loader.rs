//! Configuration file discovery and loading

use super::apicompat_config::ApiCompatConfig;
use crate::{ApiCompatError, Result};
use std::path::{Path, PathBuf};

/// Config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".apicompatrc.json",
    ".apicompatrc.toml",
    "apicompat.yaml",
    "apicompat.yml",
    "apicompat.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking up from `start_path`
    ///
    /// Each directory is checked for [`CONFIG_FILE_NAMES`] in order, up to the
    /// filesystem root.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| ApiCompatError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    pub fn load_from_file(path: &Path) -> Result<ApiCompatConfig> {
        ApiCompatConfig::load(path)
    }

    /// Load the given config file, or auto-discover one from `start_dir`
    ///
    /// An explicit path must exist. Discovery finding nothing yields the
    /// default configuration.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ApiCompatConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ApiCompatError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ApiCompatConfig::default())
            }
        }
    }
}
