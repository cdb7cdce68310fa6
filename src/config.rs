use crate::domain::{BranchNames, Preids};
use crate::error::{Result, VersionManagerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file name
pub const CONFIG_FILE: &str = "versionmanager.toml";

/// User configuration file name inside the config directory
pub const USER_CONFIG_FILE: &str = ".versionmanager.toml";

/// Represents the complete configuration for version-manager.
///
/// Contains branch-to-channel mappings, pre-release identifiers per channel,
/// the remote to use and an optional default tag template.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub commit_msg_template: Option<String>,

    #[serde(default)]
    pub branches: BranchNames,

    #[serde(default)]
    pub preids: Preids,
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            commit_msg_template: None,
            branches: BranchNames::default(),
            preids: Preids::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionmanager.toml` in `project_dir`
/// 3. `.versionmanager.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or a custom
///   path does not exist
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(project_dir),
    };

    let Some(path) = path else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        VersionManagerError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&content)
        .map_err(|e| VersionManagerError::config(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "loaded configuration");

    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn find_config(project_dir: &Path) -> Option<PathBuf> {
    let project = project_dir.join(CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.is_file())
}
