use std::fs::OpenOptions;
use std::path::Path;

use crate::config::Config;
use crate::error::ConfigError;

/// Longest path accepted for configured files and directories
pub const MAX_PATH_LENGTH: usize = 260;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn check_path(path: &str, what: &str) -> Result<(), ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::InvalidPath(format!("{} is empty", what)));
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(ConfigError::InvalidPath(format!(
            "{} is longer than {} characters: {}",
            what, MAX_PATH_LENGTH, path
        )));
    }
    Ok(())
}

fn is_writable(dir: &Path) -> bool {
    let probe = dir.join(".songbook_write_probe");
    let writable = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe)
        .is_ok();
    let _ = std::fs::remove_file(&probe);
    writable
}

impl Config {
    /// Rejects unusable settings; problems that don't stop a run come back as warnings
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "log_level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !self.drive_mount_root.starts_with('/') {
            return Err(ConfigError::InvalidValue(format!(
                "drive_mount_root must be an absolute POSIX path, got '{}'",
                self.drive_mount_root
            )));
        }

        match self.database_path.as_deref() {
            Some(":memory:") | None => {}
            Some(path) => check_path(path, "database_path")?,
        }

        check_path(&self.charts_dir, "charts_dir")?;
        let charts_dir = Path::new(&self.charts_dir);
        if !charts_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(charts_dir) {
                warnings.push(format!("could not create charts_dir {}: {}", self.charts_dir, e));
            }
        } else if !charts_dir.is_dir() {
            return Err(ConfigError::InvalidPath(format!(
                "charts_dir is not a directory: {}",
                self.charts_dir
            )));
        } else if !is_writable(charts_dir) {
            warnings.push(format!("charts_dir is not writable: {}", self.charts_dir));
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with(charts_dir: &str, log_level: &str, mount_root: &str) -> Config {
        Config {
            database_path: Some(":memory:".to_string()),
            charts_dir: charts_dir.to_string(),
            drive_mount_root: mount_root.to_string(),
            log_level: log_level.to_string(),
        }
    }

    #[test]
    fn test_valid_config_has_no_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with(temp_dir.path().to_str().unwrap(), "debug", "/mnt");
        let warnings = config.validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_missing_charts_dir_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let charts = temp_dir.path().join("nested").join("charts");
        let config = config_with(charts.to_str().unwrap(), "info", "/mnt");
        config.validate().unwrap();
        assert!(charts.is_dir());
    }

    #[test]
    fn test_charts_dir_that_is_a_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("charts");
        std::fs::write(&file, b"").unwrap();
        let config = config_with(file.to_str().unwrap(), "info", "/mnt");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPath(_))));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with(temp_dir.path().to_str().unwrap(), "verbose", "/mnt");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_relative_mount_root_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with(temp_dir.path().to_str().unwrap(), "info", "mnt");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_empty_charts_dir_rejected() {
        let config = config_with("  ", "info", "/mnt");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPath(_))));
    }

    #[test]
    fn test_overlong_path_rejected() {
        let long = format!("/{}", "x".repeat(MAX_PATH_LENGTH));
        assert!(matches!(
            check_path(&long, "charts_dir"),
            Err(ConfigError::InvalidPath(_))
        ));
        assert!(check_path("/data/charts", "charts_dir").is_ok());
    }
}
