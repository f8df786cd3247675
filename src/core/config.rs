/*
 * Read-only settings for the shell extension, taken from an optional
 * `shell_menu.json` next to the extension module. Nothing here is ever written
 * back: the menu keeps no state between invocations.
 *
 * As elsewhere in the core, loading goes through a trait
 * (`ConfigManagerOperations`) so the host facade can be tested with a mock,
 * while `CoreConfigManager` does the real file reading with `serde_json`.
 */
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "shell_menu.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellMenuConfig {
    /// Searched for the 7-Zip executables before the module directory.
    pub tools_dir: Option<PathBuf>,
    pub log_level: String,
    pub file_logging: bool,
}

impl Default for ShellMenuConfig {
    fn default() -> Self {
        ShellMenuConfig {
            tools_dir: None,
            log_level: "info".to_string(),
            file_logging: true,
        }
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    fn load_config(&self, config_dir: &Path) -> Result<ShellMenuConfig>;
}

pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    /*
     * Reads `shell_menu.json` from `config_dir`. A missing file is not an
     * error and yields the defaults; an unreadable or malformed file is.
     */
    fn load_config(&self, config_dir: &Path) -> Result<ShellMenuConfig> {
        let file_path = config_dir.join(CONFIG_FILENAME);
        if !file_path.exists() {
            log::debug!("CoreConfigManager: No config file at {file_path:?}, using defaults.");
            return Ok(ShellMenuConfig::default());
        }

        let file = File::open(&file_path)?;
        let config: ShellMenuConfig = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("CoreConfigManager: Loaded {config:?} from {file_path:?}.");
        Ok(config)
    }
}
