//! Configuration files.
//!
//! Two layers, both plain JSON:
//! - global `~/.gsheet/config.json` holds `{"credentials": "<path to key file>"}`
//! - local `<cwd>/.gsheet/config.json` holds `{"root": "~/.gsheet", "spreadsheet": "<id>"}`
//!
//! Every command except `init`/`info` requires both; a missing layer maps to
//! a specific "not initialized" error telling the user what to run. Nothing
//! is cached; files are read fresh at the start of each invocation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Global configuration: where the service-account key file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub credentials: String,
}

/// Per-working-directory configuration: which spreadsheet this directory
/// is bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    pub root: String,
    pub spreadsheet: String,
}

impl LocalConfig {
    pub fn new(spreadsheet: impl Into<String>) -> Self {
        Self {
            root: "~/.gsheet".into(),
            spreadsheet: spreadsheet.into(),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Global config missing or unreadable
    NotInitialized,
    /// Local config missing or unreadable
    NoLocalConfig,
    /// Filesystem error while writing
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotInitialized => write!(
                f,
                "Not initialized. Run: getsheet init --credentials <path> --spreadsheet <id>"
            ),
            ConfigError::NoLocalConfig => {
                write!(f, "No local config. Run: getsheet init --spreadsheet <id>")
            }
            ConfigError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The global `~/.gsheet` directory.
pub fn gsheet_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gsheet"))
}

/// Path of the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    gsheet_dir().map(|d| d.join("config.json"))
}

/// Path of the local config file under the invocation working directory.
pub fn local_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".gsheet").join("config.json")
}

/// Load the global config. Returns `None` if the file is missing or invalid.
pub fn load_global() -> Option<GlobalConfig> {
    read_json(&global_config_path()?)
}

/// Load the local config for `cwd`. Returns `None` if missing or invalid.
pub fn load_local(cwd: &Path) -> Option<LocalConfig> {
    read_json(&local_config_path(cwd))
}

/// Load both layers, gating commands that need a bound spreadsheet.
pub fn load(cwd: &Path) -> Result<(GlobalConfig, LocalConfig), ConfigError> {
    let global = load_global().ok_or(ConfigError::NotInitialized)?;
    let local = load_local(cwd).ok_or(ConfigError::NoLocalConfig)?;
    Ok((global, local))
}

/// Write the global config, creating `~/.gsheet` if needed.
pub fn save_global(config: &GlobalConfig) -> Result<(), ConfigError> {
    let path = global_config_path()
        .ok_or_else(|| ConfigError::Io("Could not determine home directory".into()))?;
    write_json(&path, config)
}

/// Write the local config for `cwd`, creating `<cwd>/.gsheet` if needed.
pub fn save_local(cwd: &Path, config: &LocalConfig) -> Result<(), ConfigError> {
    write_json(&local_config_path(cwd), config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let contents = serde_json::to_string_pretty(value)
        .map_err(|e| ConfigError::Io(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, contents)
        .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
