use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_DRIVE_MOUNT_ROOT: &str = "/mnt";

/// Directory name used under the platform data and config dirs
pub const APP_DIR_NAME: &str = "Songbook";

/// `<data dir>/Songbook`
pub fn app_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ConfigError::InvalidPath("no platform data directory".into()))
}

/// Commented config written on first run
pub fn default_config_file() -> Result<String, ConfigError> {
    let charts_dir = app_data_dir()?.join("charts");

    Ok(format!(
        r#"# Songbook configuration
# {{USER_HOME}} is replaced with your home folder in any path below.

# SQLite database; leave unset to keep it in the Songbook data folder
# database_path = '{{USER_HOME}}/songbook.db'

# Charts picked up by folder sync are copied here
charts_dir = '{charts}'

# Paths like e:\Sheets\a.pdf are read as <drive_mount_root>/e/Sheets/a.pdf
drive_mount_root = "{mount}"

# error, warn, info, debug or trace
log_level = "{level}"
"#,
        charts = charts_dir.display(),
        mount = DEFAULT_DRIVE_MOUNT_ROOT,
        level = DEFAULT_LOG_LEVEL,
    ))
}

pub fn default_charts_dir() -> String {
    app_data_dir()
        .map(|dir| dir.join("charts").display().to_string())
        .unwrap_or_else(|_| "charts".to_string())
}

pub fn default_drive_mount_root() -> String {
    DEFAULT_DRIVE_MOUNT_ROOT.to_string()
}

pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
