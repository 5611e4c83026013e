use std::fmt;
use std::io;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse database result: {0}")]
    ParseError(String),
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Repertoire {0} not found")]
    RepertoireNotFound(i64),

    #[error("No sync history to undo for repertoire {0}")]
    NothingToUndo(i64),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        SyncError::DatabaseError(DatabaseError::SqliteError(err))
    }
}

/// Problems loading or validating `config.toml`
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    NoHomeDir,
    InvalidPath(String),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O failed: {}", e),
            ConfigError::Parse(e) => write!(f, "config file is not valid TOML: {}", e),
            ConfigError::Serialize(e) => write!(f, "could not write config as TOML: {}", e),
            ConfigError::NoHomeDir => write!(f, "could not determine the home directory"),
            ConfigError::InvalidPath(s) => write!(f, "invalid path: {}", s),
            ConfigError::InvalidValue(s) => write!(f, "invalid value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse(error)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(error: toml::ser::Error) -> Self {
        ConfigError::Serialize(error)
    }
}
