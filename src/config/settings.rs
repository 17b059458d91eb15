//! Application settings and their on-disk location.
//!
//! Settings live in `settings.json` under the XDG config directory.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the configuration directory for the current user.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Defaults applied when the command line leaves an option unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Connect and banner read timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Maximum number of probes in flight.
    pub default_concurrency: usize,
    /// Output format: plain, json or csv.
    pub default_output_format: String,
    /// Enable verbose output by default.
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_timeout_ms: 500,
            default_concurrency: 500,
            default_output_format: "plain".to_string(),
            verbose: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file (or an environment without a home directory) yields
    /// the defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(_) => return Ok(Self::default()),
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}
