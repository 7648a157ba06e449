//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;
use crate::domain::entities::DisabledSet;

/// Default base configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "bootstrap.yaml";

/// Bootstrap configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub modloader: ModloaderConfig,
    pub logging: LoggingConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ModloaderConfig {
    /// Bundle directory, relative to the working directory
    pub directory: PathBuf,
    /// Comma separated bundle file names to skip
    pub disabled_mods: Option<String>,
    /// Load bundles in file name order instead of directory listing order
    pub sort_bundles: bool,
    /// Where native libraries are unpacked before loading
    pub staging_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HostConfig {
    pub program: Option<String>,
    pub args: Vec<String>,
}

impl Default for ModloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("code-mods"),
            disabled_mods: None,
            sort_bundles: false,
            staging_dir: PathBuf::from(".mod-cache"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("bootstrap.log"),
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;

        Self::from_yaml(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn disabled_mods(&self) -> DisabledSet {
        DisabledSet::parse(self.modloader.disabled_mods.as_deref())
    }

    /// Resolve the configured directories against a working directory
    pub fn rooted_at(mut self, work_dir: &Path) -> Self {
        self.modloader.directory = work_dir.join(&self.modloader.directory);
        self.modloader.staging_dir = work_dir.join(&self.modloader.staging_dir);
        self.logging.file = work_dir.join(&self.logging.file);
        self
    }
}
