//! File-path configuration.
//!
//! An optional YAML config file supplies the backing file locations; CLI
//! flags override whatever was loaded.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no explicit path is
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "task-ledger.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backing file for task records.
    #[serde(default = "default_tasks_file")]
    pub tasks_file: PathBuf,

    /// Credential file for user accounts.
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: default_tasks_file(),
            users_file: default_users_file(),
        }
    }
}

fn default_tasks_file() -> PathBuf {
    PathBuf::from("tasks.txt")
}

fn default_users_file() -> PathBuf {
    PathBuf::from("users.txt")
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Otherwise
    /// [`DEFAULT_CONFIG_FILE`] is used if present, and built-in defaults if
    /// not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.exists().then_some(path)
            }
        };
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_yaml::from_str(&contents)
                    .with_context(|| format!("failed to parse config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let config = Config::default();
        assert_eq!(config.tasks_file, PathBuf::from("tasks.txt"));
        assert_eq!(config.users_file, PathBuf::from("users.txt"));
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: Config = serde_yaml::from_str("tasks_file: /tmp/my-tasks.txt\n").unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("/tmp/my-tasks.txt"));
        assert_eq!(config.users_file, PathBuf::from("users.txt"));
    }
}
