pub mod defaults;
pub mod loader;
pub mod validator;

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use defaults::{DEFAULT_DRIVE_MOUNT_ROOT, DEFAULT_LOG_LEVEL};
pub use loader::MAX_DIRECTORY_TRAVERSAL_DEPTH;
pub use validator::MAX_PATH_LENGTH;

/// Settings read from `config.toml`.
///
/// ```toml
/// # database_path = "{USER_HOME}/.local/share/Songbook/songbook.db"
/// charts_dir = "{USER_HOME}/.local/share/Songbook/charts"
/// drive_mount_root = "/mnt"
/// log_level = "info"
/// ```
///
/// `SONGBOOK_DATABASE_PATH`, `SONGBOOK_CHARTS_DIR` and `SONGBOOK_LOG_LEVEL`
/// override the file; read through the accessor methods to honour them.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Filled with the data-directory default while loading when absent
    #[serde(default)]
    pub database_path: Option<String>,
    /// Canonical storage that synced charts are copied into
    #[serde(default = "defaults::default_charts_dir")]
    pub charts_dir: String,
    /// Drive-letter paths are rewritten under this directory
    #[serde(default = "defaults::default_drive_mount_root")]
    pub drive_mount_root: String,
    #[serde(default = "defaults::default_log_level")]
    pub log_level: String,
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn log_level(&self) -> String {
        env_override("SONGBOOK_LOG_LEVEL").unwrap_or_else(|| self.log_level.clone())
    }

    pub fn database_path(&self) -> Option<String> {
        env_override("SONGBOOK_DATABASE_PATH").or_else(|| self.database_path.clone())
    }

    pub fn charts_dir(&self) -> String {
        env_override("SONGBOOK_CHARTS_DIR").unwrap_or_else(|| self.charts_dir.clone())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// Loaded on first use; commands report the error instead of panicking
pub static CONFIG: Lazy<Result<Config, ConfigError>> = Lazy::new(Config::load);
