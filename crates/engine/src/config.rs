// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host command configuration
//!
//! Every executable the engine runs is named here so hosts with unusual
//! layouts (busybox, doas, cronie) can be driven without code changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CTM_CONFIG";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schedule-management executable
    pub crontab_bin: String,
    /// Wrapper prepended to elevated commands
    pub elevate_with: Vec<String>,
    /// Prints the path of a fresh, uniquely named temp file
    pub temp_command: Vec<String>,
    /// Removes a file; the path is appended
    pub remove_command: Vec<String>,
    /// Copies stdin into a file; the path is appended
    pub writer_command: Vec<String>,
    /// Cron service unit names, tried in order
    pub services: Vec<String>,
    /// Refuse mutations when no cron service is active
    pub require_service: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crontab_bin: "crontab".to_string(),
            elevate_with: strings(&["sudo", "-n"]),
            temp_command: strings(&["mktemp", "-t", "crontab.XXXXXX"]),
            remove_command: strings(&["rm", "-f", "--"]),
            writer_command: strings(&["tee", "--"]),
            services: strings(&["cron", "crond", "cronie"]),
            require_service: false,
        }
    }
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Resolve the config to use.
    ///
    /// An explicit path must exist. Otherwise `$CTM_CONFIG`, then the user
    /// config directory are tried, falling back to built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.crontab_bin.trim().is_empty() {
            return Err(ConfigError::Invalid("crontab_bin must not be empty".into()));
        }
        let commands = [
            ("temp_command", &self.temp_command),
            ("remove_command", &self.remove_command),
            ("writer_command", &self.writer_command),
        ];
        for (name, argv) in commands {
            if argv.is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// `<config_dir>/ctm/config.toml`, when the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ctm").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
