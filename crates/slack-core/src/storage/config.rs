//! Configuration management
//!
//! A small TOML file holding the API base URL and, when no keyring is
//! available, the API token.
//! Base URL priority: CLI argument / SLACK_API_URL > config.toml > public API

use super::Result;
use crate::api::client::DEFAULT_BASE_URL;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "slack-cli";
const CONFIG_FILE: &str = "config.toml";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Plain-file token, used only when the OS keyring is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file, creating the directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, toml_content).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        restrict_permissions(path)
    }

    /// `<dir>/config.toml`, where `dir` defaults to the platform config dir.
    pub fn config_file_path(config_dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(StorageError::ConfigDirNotFound)?
                .join(APP_DIR),
        };
        Ok(dir.join(CONFIG_FILE))
    }

    /// Effective base URL, trailing slashes removed.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .filter(|u| !u.is_empty())
            .or(self.base_url.as_deref().filter(|u| !u.is_empty()))
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
        StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
