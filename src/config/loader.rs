use std::path::{Path, PathBuf};

use crate::config::{defaults, Config};
use crate::error::ConfigError;

/// How many parent directories of the executable are searched for `config.toml`
pub const MAX_DIRECTORY_TRAVERSAL_DEPTH: usize = 5;

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_PLACEHOLDER: &str = "{USER_HOME}";

impl Config {
    /// Finds, reads and validates the config file, creating a default one if needed
    pub fn load() -> Result<Self, ConfigError> {
        let path = find_config_file()?;
        let text = std::fs::read_to_string(&path).map_err(|e| {
            ConfigError::Io(std::io::Error::new(
                e.kind(),
                format!("reading {}: {}", path.display(), e),
            ))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text)?;

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let home = home
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath("home directory is not UTF-8".into()))?;
        config.expand_home(home);

        if config
            .database_path
            .as_deref()
            .map_or(true, |path| path.trim().is_empty())
        {
            config.database_path = Some(default_database_path()?);
        }

        for warning in config.validate()? {
            eprintln!("Config warning: {}", warning);
        }
        Ok(config)
    }

    fn expand_home(&mut self, home: &str) {
        if let Some(path) = self.database_path.as_mut() {
            *path = path.replace(HOME_PLACEHOLDER, home);
        }
        self.charts_dir = self.charts_dir.replace(HOME_PLACEHOLDER, home);
    }
}

fn default_database_path() -> Result<String, ConfigError> {
    let dir = defaults::app_data_dir()?;
    std::fs::create_dir_all(&dir)?;
    dir.join("songbook.db")
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidPath("data directory is not UTF-8".into()))
}

/// Places a config file may live, most specific first
fn candidate_paths(app_config_path: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var("SONGBOOK_CONFIG") {
        candidates.push(PathBuf::from(path));
    }
    candidates.push(app_config_path.to_path_buf());

    if let Ok(exe) = std::env::current_exe() {
        candidates.extend(
            exe.ancestors()
                .skip(1)
                .take(MAX_DIRECTORY_TRAVERSAL_DEPTH)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }
    candidates
}

/// Returns the first existing config file from `SONGBOOK_CONFIG`, the platform
/// config dir, or beside the executable; otherwise writes a default into the
/// platform config dir.
pub fn find_config_file() -> Result<PathBuf, ConfigError> {
    let app_config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::InvalidPath("no platform config directory".into()))?
        .join(defaults::APP_DIR_NAME);
    let app_config_path = app_config_dir.join(CONFIG_FILE_NAME);

    if let Some(found) = candidate_paths(&app_config_path)
        .into_iter()
        .find(|path| path.is_file())
    {
        return Ok(found);
    }

    std::fs::create_dir_all(&app_config_dir)?;
    std::fs::write(&app_config_path, defaults::default_config_file()?)?;
    Ok(app_config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_touches_every_path() {
        let mut config = Config {
            database_path: Some("{USER_HOME}/db/songbook.db".into()),
            charts_dir: "{USER_HOME}/charts".into(),
            drive_mount_root: "/mnt".into(),
            log_level: "info".into(),
        };
        config.expand_home("/home/ana");
        assert_eq!(config.database_path.as_deref(), Some("/home/ana/db/songbook.db"));
        assert_eq!(config.charts_dir, "/home/ana/charts");
    }

    #[test]
    fn test_candidates_start_with_platform_dir_after_env() {
        let platform = PathBuf::from("/etc/songbook/config.toml");
        let candidates = candidate_paths(&platform);
        let platform_index = candidates.iter().position(|p| p == &platform).unwrap();
        assert!(platform_index <= 1);
        assert!(candidates.len() <= MAX_DIRECTORY_TRAVERSAL_DEPTH + 2);
    }
}
